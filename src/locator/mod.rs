//! Service locator: the name → descriptor registry.
//!
//! This module contains the `ServiceLocator` type, which registers
//! [`ServiceDescriptor`]s and resolves them by name according to their scopes.

use std::any::type_name;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use crate::descriptors::{AnyArc, Resolution, ServiceDescriptor, ServiceInfo};
use crate::error::{LocatorError, LocatorResult};
use crate::internal::{NameMap, SharedLock};
use crate::observer::{LocatorObserver, Observers};
use crate::options::{DuplicatePolicy, LocatorOptions};
use crate::scope::Scope;

mod resolve;

/// Registry mapping service names to descriptors.
///
/// `register` inserts descriptors (building `Immediate` singletons on the
/// spot) and `get` resolves them: singletons run their factory at most once
/// and hand out the cached instance or error, per-lookup services run it on
/// every call.
///
/// # Thread Safety
///
/// The locator is `Send + Sync` and clones share the same registry. The name
/// map sits behind a read/write lock that is never held while a factory runs,
/// so factories may call back into the locator and registration may overlap
/// with lookups.
///
/// # Examples
///
/// ```
/// use ferrous_locator::{BoxError, ServiceDescriptor, ServiceLocator};
/// use std::sync::Arc;
///
/// struct Config { url: String }
/// struct Repository { config: Arc<Config> }
///
/// let locator = ServiceLocator::new();
/// locator.register(ServiceDescriptor::singleton("config", |_| {
///     Ok::<_, BoxError>(Config { url: "postgres://localhost".to_string() })
/// })).unwrap();
/// locator.register(ServiceDescriptor::per_lookup("repository", |l| {
///     Ok::<_, BoxError>(Repository { config: l.get::<Config>("config")? })
/// })).unwrap();
///
/// let a = locator.get::<Repository>("repository").unwrap();
/// let b = locator.get::<Repository>("repository").unwrap();
/// assert!(!Arc::ptr_eq(&a, &b));
/// assert!(Arc::ptr_eq(&a.config, &b.config));
/// assert_eq!(a.config.url, "postgres://localhost");
/// ```
#[derive(Clone)]
pub struct ServiceLocator {
    inner: Arc<LocatorInner>,
}

struct LocatorInner {
    services: SharedLock<NameMap<Arc<ServiceDescriptor>>>,
    options: LocatorOptions,
    observers: Observers,
}

impl ServiceLocator {
    /// Creates an empty locator with default options.
    pub fn new() -> Self {
        Self::with_options(LocatorOptions::default())
    }

    /// Creates an empty locator with the given options.
    pub fn with_options(options: LocatorOptions) -> Self {
        Self {
            inner: Arc::new(LocatorInner {
                services: SharedLock::new(NameMap::default()),
                options,
                observers: Observers::new(),
            }),
        }
    }

    /// Options this locator was created with.
    pub fn options(&self) -> &LocatorOptions {
        &self.inner.options
    }

    /// Attaches an observer for registration and lookup events.
    pub fn add_observer(&self, observer: Arc<dyn LocatorObserver>) {
        self.inner.observers.add(observer);
    }

    /// Registers a descriptor under its name.
    ///
    /// - `PerLookup` descriptors are inserted as they are.
    /// - `Singleton` descriptors are inserted unconstructed, unless they also
    ///   carry `Immediate`: then the factory runs now, with this locator as
    ///   argument, and a failure rejects the registration with that error.
    /// - Descriptors with neither scope fail with [`LocatorError::InvalidScope`].
    ///
    /// An existing registration with the same name is replaced, or the call
    /// fails with [`LocatorError::Duplicate`] under [`DuplicatePolicy::Reject`].
    /// Rejected descriptors are never inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_locator::{BoxError, ServiceDescriptor, ServiceLocator};
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let built = Arc::new(AtomicUsize::new(0));
    /// let counter = built.clone();
    ///
    /// let locator = ServiceLocator::new();
    /// locator.register(ServiceDescriptor::immediate("pool", move |_| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    ///     Ok::<_, BoxError>(vec!["conn-1", "conn-2"])
    /// })).unwrap();
    ///
    /// assert_eq!(built.load(Ordering::SeqCst), 1);
    /// ```
    pub fn register(&self, descriptor: ServiceDescriptor) -> LocatorResult<()> {
        match descriptor.resolution() {
            Some(Resolution::PerLookup) => {}
            Some(Resolution::Singleton) => {
                if descriptor.has_scope(Scope::Immediate) {
                    self.reject_duplicate(descriptor.name())?;
                    if let Err(error) = descriptor.resolve_singleton(self) {
                        self.inner.observers.failed(descriptor.name(), &error);
                        return Err(error);
                    }
                }
            }
            None => {
                return Err(LocatorError::InvalidScope {
                    name: descriptor.name().to_string(),
                    scopes: descriptor.scopes(),
                });
            }
        }

        self.insert(descriptor)
    }

    /// Resolves a service by name as a type-erased instance.
    ///
    /// Fails with [`LocatorError::NotRegistered`] for unknown names and with
    /// [`LocatorError::Construction`] when the factory fails. A singleton's
    /// failure is cached: every later call returns the same error.
    pub fn get_any(&self, name: &str) -> LocatorResult<AnyArc> {
        let descriptor = match self.lookup(name) {
            Some(descriptor) => descriptor,
            None => {
                let error = LocatorError::NotRegistered(name.to_string());
                self.inner.observers.failed(name, &error);
                return Err(error);
            }
        };

        if !self.inner.observers.has_observers() {
            return self.resolve(&descriptor);
        }

        let start = std::time::Instant::now();
        self.inner.observers.resolving(name);
        let result = self.resolve(&descriptor);
        match &result {
            Ok(_) => self.inner.observers.resolved(name, start.elapsed()),
            Err(error) => self.inner.observers.failed(name, error),
        }
        result
    }

    /// Resolves a service by name and downcasts it to `T`.
    ///
    /// Fails with [`LocatorError::TypeMismatch`] when the instance registered
    /// under `name` is not a `T`.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> LocatorResult<Arc<T>> {
        self.get_any(name)?
            .downcast::<T>()
            .map_err(|_| LocatorError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Resolves a service by name, panicking if it cannot be resolved.
    ///
    /// # Panics
    ///
    /// Panics with the error message of [`get`](Self::get).
    pub fn get_required<T: Send + Sync + 'static>(&self, name: &str) -> Arc<T> {
        self.get::<T>(name).unwrap_or_else(|error| panic!("{}", error))
    }

    /// True if a descriptor is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.services.read().contains_key(name)
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.inner.services.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.services.read().is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.services.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Snapshot of every registration, sorted by name.
    pub fn describe(&self) -> Vec<ServiceInfo> {
        // Release the registry lock before reading singleton state
        let descriptors: Vec<Arc<ServiceDescriptor>> = self.inner.services.read().values().cloned().collect();
        let mut infos: Vec<ServiceInfo> = descriptors.iter().map(|descriptor| descriptor.info()).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    fn lookup(&self, name: &str) -> Option<Arc<ServiceDescriptor>> {
        self.inner.services.read().get(name).cloned()
    }

    fn reject_duplicate(&self, name: &str) -> LocatorResult<()> {
        if self.inner.options.on_duplicate == DuplicatePolicy::Reject && self.contains(name) {
            return Err(LocatorError::Duplicate(name.to_string()));
        }
        Ok(())
    }

    fn insert(&self, descriptor: ServiceDescriptor) -> LocatorResult<()> {
        let name = descriptor.name().to_string();
        let scopes = descriptor.scopes();

        let replaced = {
            let mut services = self.inner.services.write();
            match services.entry(name.clone()) {
                Entry::Occupied(mut entry) => {
                    if self.inner.options.on_duplicate == DuplicatePolicy::Reject {
                        return Err(LocatorError::Duplicate(name));
                    }
                    entry.insert(Arc::new(descriptor));
                    true
                }
                Entry::Vacant(entry) => {
                    entry.insert(Arc::new(descriptor));
                    false
                }
            }
        };

        if replaced {
            tracing::debug!(service = %name, "replacing existing registration");
            self.inner.observers.replaced(&name);
        }
        self.inner.observers.registered(&name, scopes);
        Ok(())
    }
}

impl Default for ServiceLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ServiceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceLocator")
            .field("services", &self.names())
            .field("options", &self.inner.options)
            .finish()
    }
}
