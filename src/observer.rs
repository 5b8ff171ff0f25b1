//! Diagnostic observers for registration and lookup events.
//!
//! The locator itself stays quiet apart from low-level `tracing` events.
//! Attach an observer to follow what gets registered, replaced and resolved.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::LocatorError;
use crate::internal::SharedLock;
use crate::scope::Scopes;

/// Observer trait for service locator events.
///
/// Observer calls are made synchronously on the calling thread, after the
/// registry lock has been released. Keep implementations lightweight.
///
/// # Examples
///
/// ```
/// use ferrous_locator::{LocatorObserver, ServiceDescriptor, ServiceLocator};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     events: Mutex<Vec<String>>,
/// }
///
/// impl LocatorObserver for Recorder {
///     fn resolving(&self, name: &str) {
///         self.events.lock().unwrap().push(format!("resolving {}", name));
///     }
///
///     fn resolved(&self, name: &str, _duration: Duration) {
///         self.events.lock().unwrap().push(format!("resolved {}", name));
///     }
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let locator = ServiceLocator::new();
/// locator.add_observer(recorder.clone());
///
/// locator.register(ServiceDescriptor::infallible("answer", |_| 42u32, [])).unwrap();
/// let _ = locator.get::<u32>("answer").unwrap();
///
/// assert_eq!(
///     *recorder.events.lock().unwrap(),
///     vec!["resolving answer".to_string(), "resolved answer".to_string()]
/// );
/// ```
pub trait LocatorObserver: Send + Sync {
    /// Called before a lookup resolves `name`.
    fn resolving(&self, name: &str);

    /// Called after a lookup of `name` succeeded.
    fn resolved(&self, name: &str, duration: Duration);

    /// Called when a lookup or an immediate registration fails, including
    /// lookups of unregistered names.
    fn failed(&self, name: &str, error: &LocatorError) {
        let _ = (name, error);
    }

    /// Called after a descriptor was inserted into the registry.
    fn registered(&self, name: &str, scopes: Scopes) {
        let _ = (name, scopes);
    }

    /// Called when a registration replaced an existing one with the same name.
    fn replaced(&self, name: &str) {
        let _ = name;
    }
}

/// Observer that forwards every event to `tracing`.
///
/// Lookups are logged at `TRACE`, registrations at `DEBUG` and failures at
/// `WARN`. Installing a subscriber is up to the application.
///
/// ```
/// use ferrous_locator::{LoggingObserver, ServiceLocator};
/// use std::sync::Arc;
///
/// let locator = ServiceLocator::new();
/// locator.add_observer(Arc::new(LoggingObserver::new()));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl LocatorObserver for LoggingObserver {
    fn resolving(&self, name: &str) {
        tracing::trace!(service = %name, "resolving");
    }

    fn resolved(&self, name: &str, duration: Duration) {
        tracing::trace!(service = %name, ?duration, "resolved");
    }

    fn failed(&self, name: &str, error: &LocatorError) {
        tracing::warn!(service = %name, %error, "service resolution failed");
    }

    fn registered(&self, name: &str, scopes: Scopes) {
        tracing::debug!(service = %name, %scopes, "registered");
    }

    fn replaced(&self, name: &str) {
        tracing::debug!(service = %name, "replaced existing registration");
    }
}

/// Collection of observers attached to a locator.
pub(crate) struct Observers {
    observers: SharedLock<Vec<Arc<dyn LocatorObserver>>>,
    active: AtomicBool,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: SharedLock::new(Vec::new()),
            active: AtomicBool::new(false),
        }
    }

    pub(crate) fn add(&self, observer: Arc<dyn LocatorObserver>) {
        self.observers.write().push(observer);
        self.active.store(true, Ordering::Release);
    }

    /// Returns true if any observers are attached.
    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    fn each(&self, f: impl Fn(&dyn LocatorObserver)) {
        if !self.has_observers() {
            return;
        }
        // Snapshot so observers may attach further observers without deadlocking
        let observers = self.observers.read().clone();
        for observer in &observers {
            f(observer.as_ref());
        }
    }

    pub(crate) fn resolving(&self, name: &str) {
        self.each(|o| o.resolving(name));
    }

    pub(crate) fn resolved(&self, name: &str, duration: Duration) {
        self.each(|o| o.resolved(name, duration));
    }

    pub(crate) fn failed(&self, name: &str, error: &LocatorError) {
        self.each(|o| o.failed(name, error));
    }

    pub(crate) fn registered(&self, name: &str, scopes: Scopes) {
        self.each(|o| o.registered(name, scopes));
    }

    pub(crate) fn replaced(&self, name: &str) {
        self.each(|o| o.replaced(name));
    }
}
