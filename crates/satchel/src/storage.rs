//! The storage facade: JSON-encoded key-value operations over one backend.

use std::sync::Arc;

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use satchel_store::{select_backend, Backend, BackendKind, MemoryBackend, SelectOptions};

use crate::error::{Result, StorageError};
use crate::scoped::KvStorage;

/// Handle to a selected key-value backend.
///
/// Construct one `Storage` at startup and pass clones to every consumer;
/// clones are cheap and share the same backend. All operations are async
/// regardless of whether the underlying backend is synchronous, so callers
/// see one uniform interface.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn Backend>,
    kind: BackendKind,
}

impl Storage {
    /// Select a backend with the default policy and wrap it.
    ///
    /// Prefers the file-backed store at the conventional path and falls
    /// back to memory. Never fails.
    pub async fn open() -> Self {
        Self::open_with(SelectOptions::default()).await
    }

    /// Select a backend with explicit options.
    pub async fn open_with(options: SelectOptions) -> Self {
        let (backend, kind) = select_backend(options).await;
        tracing::debug!(?kind, "storage ready");
        Self { backend, kind }
    }

    /// A storage handle over a fresh, empty in-memory backend.
    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(MemoryBackend::new()),
            kind: BackendKind::Memory,
        }
    }

    /// Wrap an already-constructed backend, bypassing selection.
    pub fn with_backend(backend: Arc<dyn Backend>, kind: BackendKind) -> Self {
        Self { backend, kind }
    }

    /// Which backend the selector resolved to.
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// A namespaced view over this storage.
    ///
    /// The view rewrites every caller key to `prefix + key`, so views with
    /// distinct prefixes never collide even though they share this backend.
    pub fn scoped(&self, prefix: impl Into<String>) -> KvStorage {
        KvStorage::new(self.clone(), prefix)
    }

    /// Serialize `value` to JSON and store it under `key`, overwriting any
    /// existing entry.
    pub async fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;

        self.backend.put(key, &text).await?;
        Ok(())
    }

    /// Read and deserialize the value under `key`.
    ///
    /// Absence is `Ok(None)`, never an error. An empty stored value also
    /// reads as `None`. Fails only if the backend fails or the stored text
    /// is not valid JSON.
    pub async fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get(key).await? {
            None => Ok(None),
            Some(text) if text.is_empty() => Ok(None),
            Some(text) => serde_json::from_str(&text).map(Some).map_err(|source| {
                StorageError::Deserialize {
                    key: key.to_string(),
                    source,
                }
            }),
        }
    }

    /// Delete the entry under `key`. Deleting a missing key is a no-op.
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        self.backend.remove(key).await?;
        Ok(())
    }

    /// Delete every entry in the backend, across all namespaces.
    pub async fn clear(&self) -> Result<()> {
        self.backend.clear().await?;
        Ok(())
    }

    /// The key at `index` in the backend's enumeration order.
    ///
    /// Order is backend-defined and not stable across mutations.
    /// Out-of-range indices resolve to `Ok(None)`.
    pub async fn key(&self, index: usize) -> Result<Option<String>> {
        Ok(self.backend.key_at(index).await?)
    }

    /// Total number of entries in the backend, across all namespaces.
    pub async fn len(&self) -> Result<usize> {
        Ok(self.backend.len().await?)
    }

    /// Whether the backend holds no entries at all.
    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Batch form of [`Storage::key`]: resolve several indices at once.
    ///
    /// Items run concurrently with fail-fast composition: the first error
    /// fails the whole batch.
    pub async fn keys(&self, indices: &[usize]) -> Result<Vec<Option<String>>> {
        try_join_all(indices.iter().map(|&index| self.key(index))).await
    }

    /// Batch form of [`Storage::get_item`]: read several keys at once.
    ///
    /// The result order mirrors the request order. Fail-fast.
    pub async fn get<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<Option<Value>>> {
        try_join_all(keys.iter().map(|key| self.get_item::<Value>(key.as_ref()))).await
    }

    /// Batch form of [`Storage::set_item`]: write several entries at once.
    ///
    /// Fail-fast; on error, entries other than the failing one may or may
    /// not have been written.
    pub async fn set<K: AsRef<str>>(&self, entries: &[(K, Value)]) -> Result<()> {
        try_join_all(
            entries
                .iter()
                .map(|(key, value)| self.set_item(key.as_ref(), value)),
        )
        .await
        .map(|_| ())
    }

    /// Batch form of [`Storage::remove_item`]: delete several keys at once.
    ///
    /// Fail-fast.
    pub async fn remove<K: AsRef<str>>(&self, keys: &[K]) -> Result<()> {
        try_join_all(keys.iter().map(|key| self.remove_item(key.as_ref())))
            .await
            .map(|_| ())
    }

    /// All backend keys in enumeration order, for namespace accounting.
    pub(crate) async fn raw_keys(&self) -> Result<Vec<String>> {
        Ok(self.backend.keys().await?)
    }
}
