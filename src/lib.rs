//! # ferrous-locator
//!
//! A minimal service locator: a registry mapping string names to lazily or
//! eagerly constructed service instances.
//!
//! ## Features
//!
//! - **Named services**: each service is registered under a unique name with an explicit factory
//! - **Three scopes**: `Singleton`, `PerLookup` and the `Immediate` modifier for eager singletons
//! - **Run-once singletons**: concurrent first lookups run the factory exactly once
//! - **Sticky failures**: a failed singleton keeps returning the same error
//! - **Thread-safe**: `Send + Sync` locator, cheap to clone
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_locator::{BoxError, Scope, ServiceDescriptor, ServiceLocator};
//! use std::sync::Arc;
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! let locator = ServiceLocator::new();
//!
//! // Singleton is the default scope
//! locator.register(ServiceDescriptor::new("db", |_| {
//!     Ok::<_, BoxError>(Database { connection_string: "postgres://localhost".to_string() })
//! }, [])).unwrap();
//!
//! // Factories receive the locator and resolve their own dependencies
//! locator.register(ServiceDescriptor::new("users", |l| {
//!     Ok::<_, BoxError>(UserService { db: l.get::<Database>("db")? })
//! }, [Scope::PerLookup])).unwrap();
//!
//! let users = locator.get::<UserService>("users").unwrap();
//! assert_eq!(users.db.connection_string, "postgres://localhost");
//! ```
//!
//! ## Service Scopes
//!
//! | Scope | Effect |
//! |---|---|
//! | `Singleton` | Constructed at most once; instance or error cached and shared |
//! | `PerLookup` | Constructed on every lookup; never cached |
//! | `Immediate` | With `Singleton`: constructed during `register` instead of first lookup |
//!
//! A descriptor carrying both `PerLookup` and `Singleton` is resolved per lookup.
//! A descriptor carrying neither is rejected by `register`.
//!
//! ## Sticky Failures
//!
//! ```rust
//! use ferrous_locator::{LocatorError, ServiceDescriptor, ServiceLocator};
//! use std::sync::Arc;
//!
//! let locator = ServiceLocator::new();
//! locator.register(ServiceDescriptor::singleton("broken", |_| {
//!     Err::<u32, _>("connection refused")
//! })).unwrap();
//!
//! let first = locator.get_any("broken").unwrap_err();
//! let second = locator.get_any("broken").unwrap_err();
//! match (first, second) {
//!     (LocatorError::Construction { source: a, .. }, LocatorError::Construction { source: b, .. }) => {
//!         assert!(Arc::ptr_eq(&a, &b));
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! ## Cargo Features
//!
//! - `once-cell`: singleton guard backed by `once_cell::sync::OnceCell` instead of
//!   `std::sync::OnceLock`
//! - `parking-lot`: registry lock backed by `parking_lot::RwLock`
//! - `ahash`: registry map hashed with `ahash`
//! - `config`: `serde` support for [`LocatorOptions`]
//! - `performance`: all of `once-cell`, `parking-lot` and `ahash`

pub mod descriptors;
pub mod error;
pub mod locator;
pub mod observer;
pub mod options;
pub mod scope;

// Internal modules
mod internal;

pub use descriptors::{AnyArc, ServiceDescriptor, ServiceInfo, ServiceState};
pub use error::{BoxError, LocatorError, LocatorResult};
pub use locator::ServiceLocator;
pub use observer::{LocatorObserver, LoggingObserver};
pub use options::{DuplicatePolicy, LocatorOptions};
pub use scope::{Scope, Scopes};
