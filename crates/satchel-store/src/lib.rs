//! # Satchel Store
//!
//! Backend layer for Satchel. Provides a trait-based interface for raw
//! string key-value persistence with SQLite and in-memory implementations,
//! plus the capability probe and selection policy that decide which backend
//! a host gets.
//!
//! ## Overview
//!
//! The store module abstracts raw persistence behind the [`Backend`] trait,
//! allowing the storage facade to stay backend-agnostic. Persistent hosts
//! get [`SqliteBackend`]; hosts without file I/O (or whose store is broken)
//! fall back to [`MemoryBackend`]. Embedders with their own persistent
//! store implement [`Backend`] and hand it to the selector.
//!
//! ## Key Types
//!
//! - [`Backend`] - The async trait for all raw storage operations
//! - [`SqliteBackend`] - File-backed persistent storage
//! - [`MemoryBackend`] - In-memory storage, the unconditional fallback
//! - [`ProbeResult`] - Outcome of the capability probe
//! - [`SelectOptions`] / [`select_backend`] - The selection policy
//!
//! ## Usage
//!
//! ```rust,no_run
//! use satchel_store::{select_backend, Backend, BackendKind, SelectOptions};
//!
//! async fn example() {
//!     // Resolve a backend: native handle, then file, then memory
//!     let (backend, kind) = select_backend(SelectOptions::default()).await;
//!
//!     if kind == BackendKind::Memory {
//!         // Nothing will persist past this process
//!     }
//!
//!     backend.put("auth_key", "\"2a…\"").await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **One backend per handle**: selection runs once; no hot-swapping and
//!   no data migration if the environment changes mid-process
//! - **Probe before trust**: a backend is only selected after a sentinel
//!   write-then-delete succeeds
//! - **Quota is a soft signal**: a full-but-populated store probes as
//!   `QuotaExceeded`, not as a hard error

pub mod backend;
pub mod error;
pub mod memory;
pub mod migration;
pub mod select;
pub mod sqlite;

pub use backend::{probe, Backend, ProbeResult, PROBE_KEY};
pub use error::{Result, StoreError};
pub use memory::MemoryBackend;
pub use select::{select_backend, BackendKind, SelectOptions, DEFAULT_STORE_PATH};
pub use sqlite::SqliteBackend;
