//! Scope-specific resolution strategies.

use super::ServiceLocator;
use crate::descriptors::{AnyArc, Resolution, ServiceDescriptor};
use crate::error::LocatorResult;

impl ServiceLocator {
    /// Dispatches on the descriptor's scopes.
    pub(super) fn resolve(&self, descriptor: &ServiceDescriptor) -> LocatorResult<AnyArc> {
        match descriptor.resolution() {
            Some(Resolution::Singleton) => self.resolve_singleton(descriptor),
            _ => self.resolve_per_lookup(descriptor),
        }
    }

    /// Cached instance or error; the factory runs once across all callers.
    #[inline]
    fn resolve_singleton(&self, descriptor: &ServiceDescriptor) -> LocatorResult<AnyArc> {
        descriptor.resolve_singleton(self)
    }

    /// Fresh factory run on every call, no caching and no synchronization.
    #[inline]
    fn resolve_per_lookup(&self, descriptor: &ServiceDescriptor) -> LocatorResult<AnyArc> {
        descriptor.construct(self)
    }
}
