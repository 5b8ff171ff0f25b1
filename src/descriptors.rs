//! Service descriptors: name, scopes, factory and cached singleton outcome.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, LocatorError};
use crate::internal::singleton_cell::Outcome;
use crate::internal::SingletonCell;
use crate::locator::ServiceLocator;
use crate::scope::{Scope, Scopes};

/// Type-erased, shareable service instance.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Type-erased factory stored on a descriptor.
pub(crate) type ErasedFactory = Box<dyn Fn(&ServiceLocator) -> Result<AnyArc, BoxError> + Send + Sync>;

/// How the locator resolves a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    Singleton,
    PerLookup,
}

/// Construction state of a registered service, for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Singleton whose factory has not run yet
    Pending,
    /// Singleton constructed successfully; the instance is cached
    Constructed,
    /// Singleton whose factory failed; the error is cached
    Failed,
    /// Per-lookup service, never cached
    Transient,
}

/// A named service registration.
///
/// Pairs a unique name with a [`Scopes`] set and a factory. The factory
/// receives the owning [`ServiceLocator`], so it can resolve the services it
/// depends on. For singletons the descriptor also holds the run-once guard and
/// the cached construction outcome.
///
/// A descriptor created without scopes is a `Singleton`.
///
/// # Examples
///
/// ```rust
/// use ferrous_locator::{BoxError, Scope, ServiceDescriptor};
///
/// struct Clock;
///
/// let descriptor = ServiceDescriptor::new("clock", |_| Ok::<_, BoxError>(Clock), []);
/// assert!(descriptor.has_scope(Scope::Singleton));
/// assert!(!descriptor.has_scope(Scope::Singleton | Scope::Immediate));
///
/// let eager = ServiceDescriptor::new(
///     "clock",
///     |_| Ok::<_, BoxError>(Clock),
///     [Scope::Singleton, Scope::Immediate],
/// );
/// assert!(eager.has_scope(Scope::Singleton | Scope::Immediate));
/// ```
pub struct ServiceDescriptor {
    name: String,
    scopes: Scopes,
    factory: ErasedFactory,
    singleton: Option<SingletonCell>,
}

impl ServiceDescriptor {
    /// Creates a descriptor from a fallible factory.
    ///
    /// Scopes are OR-combined; an empty list means `Singleton`.
    pub fn new<T, E, F>(name: impl Into<String>, factory: F, scopes: impl IntoIterator<Item = Scope>) -> Self
    where
        T: Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn(&ServiceLocator) -> Result<T, E> + Send + Sync + 'static,
    {
        let erased: ErasedFactory = Box::new(move |locator: &ServiceLocator| {
            factory(locator)
                .map(|value| Arc::new(value) as AnyArc)
                .map_err(Into::into)
        });
        Self::from_parts(name.into(), erased, scopes.into_iter().collect())
    }

    /// Creates a descriptor from a factory that cannot fail.
    pub fn infallible<T, F>(name: impl Into<String>, factory: F, scopes: impl IntoIterator<Item = Scope>) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceLocator) -> T + Send + Sync + 'static,
    {
        Self::new(name, move |locator| Ok::<T, BoxError>(factory(locator)), scopes)
    }

    /// Creates a descriptor whose factory already produces a type-erased instance.
    ///
    /// Useful when one name should hand out an `Arc` the caller built itself,
    /// for example a trait object wrapped by the caller.
    pub fn from_erased<F>(name: impl Into<String>, factory: F, scopes: impl IntoIterator<Item = Scope>) -> Self
    where
        F: Fn(&ServiceLocator) -> Result<AnyArc, BoxError> + Send + Sync + 'static,
    {
        Self::from_parts(name.into(), Box::new(factory), scopes.into_iter().collect())
    }

    /// Creates a descriptor from raw scope flag values.
    ///
    /// Unrecognized flags are dropped without error; if nothing recognized
    /// remains the descriptor is a `Singleton`.
    ///
    /// ```rust
    /// use ferrous_locator::{BoxError, Scope, ServiceDescriptor};
    ///
    /// let descriptor = ServiceDescriptor::from_flags("id", |_| Ok::<_, BoxError>(1u64), &[2, 9]);
    /// assert!(descriptor.has_scope(Scope::PerLookup));
    /// assert!(!descriptor.has_scope(Scope::Singleton));
    /// ```
    pub fn from_flags<T, E, F>(name: impl Into<String>, factory: F, flags: &[u8]) -> Self
    where
        T: Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn(&ServiceLocator) -> Result<T, E> + Send + Sync + 'static,
    {
        let scopes = Scopes::from_flags(flags.iter().copied());
        Self::new(name, factory, scopes.iter())
    }

    /// Shorthand for a lazily constructed `Singleton`.
    pub fn singleton<T, E, F>(name: impl Into<String>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn(&ServiceLocator) -> Result<T, E> + Send + Sync + 'static,
    {
        Self::new(name, factory, [Scope::Singleton])
    }

    /// Shorthand for a `PerLookup` service.
    pub fn per_lookup<T, E, F>(name: impl Into<String>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn(&ServiceLocator) -> Result<T, E> + Send + Sync + 'static,
    {
        Self::new(name, factory, [Scope::PerLookup])
    }

    /// Shorthand for a `Singleton | Immediate` service, built during registration.
    pub fn immediate<T, E, F>(name: impl Into<String>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn(&ServiceLocator) -> Result<T, E> + Send + Sync + 'static,
    {
        Self::new(name, factory, [Scope::Singleton, Scope::Immediate])
    }

    fn from_parts(name: String, factory: ErasedFactory, mut scopes: Scopes) -> Self {
        if scopes.is_empty() {
            scopes.insert(Scope::Singleton);
        }
        let singleton = scopes.contains(Scope::Singleton).then(SingletonCell::new);
        Self {
            name,
            scopes,
            factory,
            singleton,
        }
    }

    /// Service name, unique within one locator.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current scope set.
    pub fn scopes(&self) -> Scopes {
        self.scopes
    }

    /// Adds a scope. Adding one that is already present does nothing.
    pub fn in_scope(&mut self, scope: Scope) {
        if self.scopes.contains(scope) {
            return;
        }
        self.scopes.insert(scope);
        if scope == Scope::Singleton && self.singleton.is_none() {
            self.singleton = Some(SingletonCell::new());
        }
    }

    /// Adds a scope given as a raw flag value; unrecognized values are ignored.
    pub fn in_scope_flag(&mut self, flag: u8) {
        match Scope::from_bits(flag) {
            Some(scope) => self.in_scope(scope),
            None => tracing::trace!(service = %self.name, flag, "ignoring unrecognized scope flag"),
        }
    }

    /// True iff every flag in `scopes` is set on this descriptor.
    ///
    /// `has_scope(Scope::Singleton | Scope::Immediate)` holds only when both are set.
    pub fn has_scope(&self, scopes: impl Into<Scopes>) -> bool {
        self.scopes.contains(scopes)
    }

    /// Construction state as seen by the locator.
    pub fn state(&self) -> ServiceState {
        match (self.resolution(), &self.singleton) {
            (Some(Resolution::Singleton), Some(cell)) => cell.state(),
            _ => ServiceState::Transient,
        }
    }

    /// Resolution strategy, or `None` when the scopes are not registrable.
    ///
    /// `PerLookup` wins when both it and `Singleton` are set.
    pub(crate) fn resolution(&self) -> Option<Resolution> {
        if self.scopes.contains(Scope::PerLookup) {
            Some(Resolution::PerLookup)
        } else if self.scopes.contains(Scope::Singleton) {
            Some(Resolution::Singleton)
        } else {
            None
        }
    }

    /// Runs the factory once, uncached.
    pub(crate) fn construct(&self, locator: &ServiceLocator) -> Outcome {
        (self.factory)(locator).map_err(|source| LocatorError::construction(&self.name, source))
    }

    /// Returns the cached singleton outcome, constructing it on first use.
    pub(crate) fn resolve_singleton(&self, locator: &ServiceLocator) -> Outcome {
        match &self.singleton {
            Some(cell) => cell.get_or_init(|| self.construct(locator)),
            // in_scope allocates the cell whenever Singleton is added
            None => self.construct(locator),
        }
    }

    pub(crate) fn info(&self) -> ServiceInfo {
        ServiceInfo {
            name: self.name.clone(),
            scopes: self.scopes,
            state: self.state(),
        }
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("name", &self.name)
            .field("scopes", &self.scopes)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Snapshot of a registered service for diagnostics.
///
/// Returned by [`ServiceLocator::describe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Registered name
    pub name: String,
    /// Scope set of the descriptor
    pub scopes: Scopes,
    /// Construction state at the time of the snapshot
    pub state: ServiceState,
}
