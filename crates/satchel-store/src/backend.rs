//! Backend trait: the abstract interface over a raw key-value store.
//!
//! This trait lets the storage facade stay backend-agnostic. Implementations
//! include SQLite (file-backed), an in-memory map, and whatever persistent
//! store the embedding host supplies.

use async_trait::async_trait;

use crate::error::{Result, StoreError};

/// Sentinel key written and deleted by [`probe`].
pub const PROBE_KEY: &str = "__satchel_probe__";

/// The raw string-to-string surface shared by all backends.
///
/// Values are opaque at this layer; JSON encoding happens one level up.
/// Enumeration order (`key_at`, `keys`) is backend-defined and not stable
/// across mutations. Implementations serialize access internally, so every
/// method takes `&self`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Write `value` under `key`, overwriting any existing entry.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Read the raw value for `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete the entry for `key`. Deleting a missing key is a no-op.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Delete every entry in the backend.
    async fn clear(&self) -> Result<()>;

    /// The key at `index` in enumeration order, or `None` if out of range.
    async fn key_at(&self, index: usize) -> Result<Option<String>>;

    /// Total number of entries.
    async fn len(&self) -> Result<usize>;

    /// All keys, in enumeration order.
    async fn keys(&self) -> Result<Vec<String>>;
}

/// Outcome of probing a backend for usability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// The backend accepted a sentinel write; safe to select.
    Available,
    /// The backend holds data but has no room for new writes.
    QuotaExceeded,
    /// The backend cannot be used at all.
    Unavailable,
}

impl ProbeResult {
    /// Whether this outcome permits selecting the backend for new writes.
    pub fn is_usable(self) -> bool {
        matches!(self, ProbeResult::Available)
    }
}

/// Check whether `backend` can accept new writes.
///
/// Writes a sentinel key, then deletes it again, so a successful probe
/// leaves no trace. Cleanup is best-effort: a failing delete does not fail
/// the probe.
///
/// A quota rejection counts as [`ProbeResult::QuotaExceeded`] only when the
/// backend already holds at least one entry; a full-but-empty store is
/// indistinguishable from a broken one and reports `Unavailable`.
pub async fn probe(backend: &dyn Backend) -> ProbeResult {
    match backend.put(PROBE_KEY, PROBE_KEY).await {
        Ok(()) => {
            let _ = backend.remove(PROBE_KEY).await;
            ProbeResult::Available
        }
        Err(StoreError::QuotaExceeded) => match backend.len().await {
            Ok(n) if n > 0 => ProbeResult::QuotaExceeded,
            _ => ProbeResult::Unavailable,
        },
        Err(_) => ProbeResult::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;

    #[tokio::test]
    async fn test_probe_healthy_backend() {
        let backend = MemoryBackend::new();

        assert_eq!(probe(&backend).await, ProbeResult::Available);

        // No sentinel left behind
        assert_eq!(backend.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_probe_quota_on_populated_backend() {
        let backend = MemoryBackend::with_capacity(1);
        backend.put("existing", "1").await.unwrap();

        assert_eq!(probe(&backend).await, ProbeResult::QuotaExceeded);
    }

    #[tokio::test]
    async fn test_probe_quota_on_empty_backend_is_unavailable() {
        let backend = MemoryBackend::with_capacity(0);

        assert_eq!(probe(&backend).await, ProbeResult::Unavailable);
    }

    #[tokio::test]
    async fn test_probe_does_not_disturb_existing_entries() {
        let backend = MemoryBackend::new();
        backend.put("keep", "me").await.unwrap();

        assert_eq!(probe(&backend).await, ProbeResult::Available);
        assert_eq!(backend.get("keep").await.unwrap().as_deref(), Some("me"));
        assert_eq!(backend.len().await.unwrap(), 1);
    }
}
