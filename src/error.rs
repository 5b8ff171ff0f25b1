//! Error types for the service locator.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::scope::Scopes;

/// Boxed error returned by service factories.
///
/// Any `std::error::Error + Send + Sync` converts into this with `?`, including
/// [`LocatorError`] itself, so a factory can resolve its dependencies through
/// the locator and propagate lookup failures directly.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Service locator errors
///
/// Represents the conditions that can occur while registering or resolving
/// named services. All of them are returned to the caller; the locator never
/// panics on its own for any of these.
///
/// # Examples
///
/// ```rust
/// use ferrous_locator::{LocatorError, ServiceLocator};
///
/// let locator = ServiceLocator::new();
/// match locator.get_any("missing") {
///     Err(LocatorError::NotRegistered(name)) => assert_eq!(name, "missing"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum LocatorError {
    /// No descriptor is registered under the name
    NotRegistered(String),
    /// Descriptor carries neither `Singleton` nor `PerLookup`
    InvalidScope {
        name: String,
        scopes: Scopes,
    },
    /// The service factory failed.
    ///
    /// For singletons this value is cached and every later lookup receives a
    /// clone sharing the same `source`.
    Construction {
        name: String,
        source: Arc<dyn Error + Send + Sync + 'static>,
    },
    /// The constructed instance is not of the requested type
    TypeMismatch {
        name: String,
        expected: &'static str,
    },
    /// A raw flag value outside the recognized scope set
    UnknownScope(u8),
    /// Name already registered and the locator rejects duplicates
    Duplicate(String),
}

impl LocatorError {
    /// Wraps a factory failure for the named service.
    pub(crate) fn construction(name: &str, source: BoxError) -> Self {
        LocatorError::Construction {
            name: name.to_string(),
            source: Arc::from(source),
        }
    }

    /// Name of the service the error refers to, if any.
    pub fn service_name(&self) -> Option<&str> {
        match self {
            LocatorError::NotRegistered(name)
            | LocatorError::Duplicate(name)
            | LocatorError::InvalidScope { name, .. }
            | LocatorError::Construction { name, .. }
            | LocatorError::TypeMismatch { name, .. } => Some(name),
            LocatorError::UnknownScope(_) => None,
        }
    }
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorError::NotRegistered(name) => {
                write!(f, "Service not registered: {}", name)
            }
            LocatorError::InvalidScope { name, scopes } => {
                write!(f, "Invalid scopes for service {}: {} (mask {})", name, scopes, scopes.bits())
            }
            LocatorError::Construction { name, source } => {
                write!(f, "Failed to construct service {}: {}", name, source)
            }
            LocatorError::TypeMismatch { name, expected } => {
                write!(f, "Type mismatch for service {}: expected {}", name, expected)
            }
            LocatorError::UnknownScope(flag) => write!(f, "Unknown scope flag: {}", flag),
            LocatorError::Duplicate(name) => write!(f, "Service already registered: {}", name),
        }
    }
}

impl Error for LocatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LocatorError::Construction { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type for locator operations
///
/// A convenience alias for `Result<T, LocatorError>`.
///
/// # Examples
///
/// ```rust
/// use ferrous_locator::{LocatorError, LocatorResult};
///
/// fn lookup() -> LocatorResult<u32> {
///     Err(LocatorError::NotRegistered("clock".to_string()))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type LocatorResult<T> = Result<T, LocatorError>;
