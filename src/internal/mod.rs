//! Internal implementation details.

pub(crate) mod lock;
pub(crate) mod singleton_cell;

pub(crate) use lock::SharedLock;
pub(crate) use singleton_cell::SingletonCell;

use std::collections::HashMap;

/// Name-keyed map used by the registry.
#[cfg(feature = "ahash")]
pub(crate) type NameMap<V> = HashMap<String, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
pub(crate) type NameMap<V> = HashMap<String, V>;
