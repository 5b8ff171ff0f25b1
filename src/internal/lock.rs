//! Read/write lock used for the registry map.
//!
//! Backed by `parking_lot` with the `parking-lot` feature, otherwise by
//! `std::sync::RwLock` with poisoning ignored. Poisoning can only come from a
//! panic while the map itself is being mutated, and map inserts do not run
//! user code.

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{RwLockReadGuard, RwLockWriteGuard};
#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{RwLockReadGuard, RwLockWriteGuard};

pub(crate) struct SharedLock<T> {
    #[cfg(feature = "parking-lot")]
    inner: parking_lot::RwLock<T>,
    #[cfg(not(feature = "parking-lot"))]
    inner: std::sync::RwLock<T>,
}

impl<T> SharedLock<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            #[cfg(feature = "parking-lot")]
            inner: parking_lot::RwLock::new(value),
            #[cfg(not(feature = "parking-lot"))]
            inner: std::sync::RwLock::new(value),
        }
    }

    #[inline]
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
        #[cfg(feature = "parking-lot")]
        {
            self.inner.read()
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }

    #[inline]
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
        #[cfg(feature = "parking-lot")]
        {
            self.inner.write()
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }
}
