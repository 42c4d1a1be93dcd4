//! # Satchel
//!
//! Persistent, namespaced key-value storage for protocol clients.
//!
//! ## Overview
//!
//! Satchel sits beneath a larger protocol client and gives it durable
//! key-value storage that works the same across heterogeneous hosts:
//!
//! - **Capability probe**: a sentinel write-then-delete decides whether a
//!   candidate persistent store is actually usable
//! - **Backend selection**: exactly one backend per [`Storage`] handle - a
//!   host-provided store, a SQLite file at a conventional path, or an
//!   in-memory map as the unconditional fallback
//! - **Core operations**: async `set_item`/`get_item`/`remove_item`/`clear`
//!   with JSON value encoding, plus concurrent fail-fast batch forms
//! - **Namespaced views**: [`KvStorage`] prefixes every key so independent
//!   logical stores share one physical backend without collisions
//!
//! ## Usage
//!
//! ```rust,no_run
//! use satchel::Storage;
//!
//! async fn example() -> satchel::Result<()> {
//!     // Select a backend once, at startup
//!     let storage = Storage::open().await;
//!
//!     // Values are anything serde can turn into JSON
//!     storage.set_item("server_time_offset", &-142).await?;
//!     let offset: Option<i64> = storage.get_item("server_time_offset").await?;
//!     assert_eq!(offset, Some(-142));
//!
//!     // Namespaced views share the backend but never collide
//!     let session = storage.scoped("session1:");
//!     session.set_item("auth_key", &"0a1b2c").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Caveats
//!
//! - [`Storage::clear`] (and [`KvStorage::clear`]) wipes the whole backend,
//!   every namespace included
//! - Backend choice is fixed for the life of the handle; data is never
//!   migrated if the environment changes

pub mod error;
pub mod scoped;
pub mod storage;

pub use error::{Result, StorageError};
pub use scoped::KvStorage;
pub use storage::Storage;

// Re-export the backend layer for embedders that bring their own store
pub use satchel_store as store;
pub use satchel_store::{probe, Backend, BackendKind, ProbeResult, SelectOptions, StoreError};
