//! Locator configuration.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// What `register` does when the name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum DuplicatePolicy {
    /// Last registration wins, silently
    #[default]
    Replace,
    /// Fail with [`LocatorError::Duplicate`](crate::LocatorError::Duplicate) and keep the first
    Reject,
}

/// Options for a [`ServiceLocator`](crate::ServiceLocator).
///
/// The defaults reproduce the plain locator: duplicate names replace earlier
/// registrations.
///
/// # Examples
///
/// ```
/// use ferrous_locator::{BoxError, DuplicatePolicy, LocatorError, LocatorOptions, ServiceDescriptor, ServiceLocator};
///
/// let options = LocatorOptions::new().on_duplicate(DuplicatePolicy::Reject);
/// let locator = ServiceLocator::with_options(options);
///
/// locator.register(ServiceDescriptor::singleton("port", |_| Ok::<_, BoxError>(8080u16))).unwrap();
/// let second = locator.register(ServiceDescriptor::singleton("port", |_| Ok::<_, BoxError>(9090u16)));
///
/// assert!(matches!(second, Err(LocatorError::Duplicate(name)) if name == "port"));
/// assert_eq!(*locator.get::<u16>("port").unwrap(), 8080);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct LocatorOptions {
    /// Behaviour on re-registration of an existing name
    pub on_duplicate: DuplicatePolicy,
}

impl LocatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicate-name policy.
    pub fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    /// Loads options from a JSON document; missing fields keep their defaults.
    ///
    /// ```
    /// use ferrous_locator::{DuplicatePolicy, LocatorOptions};
    ///
    /// let options = LocatorOptions::from_json(r#"{ "on_duplicate": "reject" }"#).unwrap();
    /// assert_eq!(options.on_duplicate, DuplicatePolicy::Reject);
    /// ```
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
