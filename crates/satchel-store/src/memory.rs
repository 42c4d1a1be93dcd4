//! In-memory implementation of the Backend trait.
//!
//! The last-resort fallback when no persistent store is usable, and the
//! default backend in tests. Same semantics as the persistent backends, but
//! all data is lost when the backend is dropped.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::backend::Backend;
use crate::error::{Result, StoreError};

/// In-memory backend.
///
/// Thread-safe via RwLock. Enumeration order is lexicographic by key.
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend with no entry limit.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            capacity: None,
        }
    }

    /// Create a backend that rejects writes of *new* keys once `capacity`
    /// entries exist, reporting [`StoreError::QuotaExceeded`].
    ///
    /// Overwrites of existing keys always succeed. This mirrors the quota
    /// behavior of host persistent stores and is used to exercise the
    /// capability probe.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            capacity: Some(capacity),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();

        if let Some(capacity) = self.capacity {
            if !entries.contains_key(key) && entries.len() >= capacity {
                return Err(StoreError::QuotaExceeded);
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.clear();
        Ok(())
    }

    async fn key_at(&self, index: usize) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.keys().nth(index).cloned())
    }

    async fn len(&self) -> Result<usize> {
        let entries = self.entries.read().unwrap();
        Ok(entries.len())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.keys().cloned().collect())
    }
}
