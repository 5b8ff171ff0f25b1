//! Run-once slot holding a singleton's construction outcome.

use crate::descriptors::{AnyArc, ServiceState};
use crate::error::LocatorResult;

#[cfg(feature = "once-cell")]
type Slot<T> = once_cell::sync::OnceCell<T>;
#[cfg(not(feature = "once-cell"))]
type Slot<T> = std::sync::OnceLock<T>;

/// Outcome of a singleton factory run: the instance or the sticky failure.
pub(crate) type Outcome = LocatorResult<AnyArc>;

/// Guard that runs a singleton factory exactly once.
///
/// Concurrent first callers block until the single run finishes and then all
/// observe its outcome. A failed run is stored like a successful one and is
/// never retried. If the factory panics nothing is stored, so the next caller
/// runs it again.
///
/// Reading the stored outcome or the state never blocks, even while the
/// factory is running. The factory must not resolve its own service: the
/// re-entrant call blocks on the slot it is filling.
pub(crate) struct SingletonCell {
    slot: Slot<Outcome>,
}

impl SingletonCell {
    pub(crate) fn new() -> Self {
        Self { slot: Slot::new() }
    }

    /// Returns the stored outcome, running `init` first if nothing is stored yet.
    pub(crate) fn get_or_init<F>(&self, init: F) -> Outcome
    where
        F: FnOnce() -> Outcome,
    {
        // Fast path: lock-free read once populated
        if let Some(outcome) = self.slot.get() {
            return outcome.clone();
        }
        self.slot.get_or_init(init).clone()
    }

    /// Construction state without running anything.
    ///
    /// A factory still running reports `Pending`.
    pub(crate) fn state(&self) -> ServiceState {
        match self.slot.get().map(Result::is_ok) {
            None => ServiceState::Pending,
            Some(true) => ServiceState::Constructed,
            Some(false) => ServiceState::Failed,
        }
    }
}
