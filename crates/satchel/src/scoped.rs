//! Namespaced view over a shared storage backend.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::storage::Storage;

/// A prefixed view of a [`Storage`].
///
/// Every caller key is rewritten to `prefix + key` before it reaches the
/// backend, so views with distinct prefixes never read or write each
/// other's entries even though they share one physical backend. The view
/// owns no data: any number of `KvStorage` instances with the same prefix
/// are equivalent views of the same entries, and an empty prefix is the
/// identity view.
#[derive(Clone)]
pub struct KvStorage {
    storage: Storage,
    prefix: String,
}

impl KvStorage {
    /// Create a view with `prefix` over `storage`.
    pub fn new(storage: Storage, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
        }
    }

    /// The namespace prefix of this view.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn effective_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Store `value` under `prefix + key`. See [`Storage::set_item`].
    pub async fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.storage.set_item(&self.effective_key(key), value).await
    }

    /// Read the value under `prefix + key`. See [`Storage::get_item`].
    pub async fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.storage.get_item(&self.effective_key(key)).await
    }

    /// Delete the entry under `prefix + key`. See [`Storage::remove_item`].
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        self.storage.remove_item(&self.effective_key(key)).await
    }

    /// Batch read under this namespace, in request order. Fail-fast.
    pub async fn get<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<Option<Value>>> {
        let keys: Vec<String> = keys
            .iter()
            .map(|key| self.effective_key(key.as_ref()))
            .collect();
        self.storage.get(&keys).await
    }

    /// Batch write under this namespace. Fail-fast.
    pub async fn set<K: AsRef<str>>(&self, entries: &[(K, Value)]) -> Result<()> {
        let entries: Vec<(String, Value)> = entries
            .iter()
            .map(|(key, value)| (self.effective_key(key.as_ref()), value.clone()))
            .collect();
        self.storage.set(&entries).await
    }

    /// Batch delete under this namespace. Fail-fast.
    pub async fn remove<K: AsRef<str>>(&self, keys: &[K]) -> Result<()> {
        let keys: Vec<String> = keys
            .iter()
            .map(|key| self.effective_key(key.as_ref()))
            .collect();
        self.storage.remove(&keys).await
    }

    /// Delete every entry in the shared backend.
    ///
    /// This is a whole-backend operation: it wipes *all* namespaces, not
    /// just this view's prefix.
    pub async fn clear(&self) -> Result<()> {
        self.storage.clear().await
    }

    /// Total number of entries in the shared backend, across all
    /// namespaces. Use [`KvStorage::scoped_len`] for this view's own count.
    pub async fn len(&self) -> Result<usize> {
        self.storage.len().await
    }

    /// Number of entries whose key starts with this view's prefix.
    ///
    /// With an empty prefix this equals [`KvStorage::len`].
    pub async fn scoped_len(&self) -> Result<usize> {
        let keys = self.storage.raw_keys().await?;
        Ok(keys
            .iter()
            .filter(|key| key.starts_with(&self.prefix))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prefix_is_applied_on_write() {
        let storage = Storage::in_memory();
        let view = storage.scoped("ns1:");

        view.set_item("foo", &123456).await.unwrap();

        // Invisible under the bare key, visible under the effective key
        assert_eq!(storage.get_item::<i64>("foo").await.unwrap(), None);
        assert_eq!(
            storage.get_item::<i64>("ns1:foo").await.unwrap(),
            Some(123456)
        );
        assert_eq!(view.get_item::<i64>("foo").await.unwrap(), Some(123456));
    }

    #[tokio::test]
    async fn test_same_prefix_views_are_equivalent() {
        let storage = Storage::in_memory();
        let a = storage.scoped("ns:");
        let b = storage.scoped("ns:");

        a.set_item("k", &"shared").await.unwrap();
        assert_eq!(
            b.get_item::<String>("k").await.unwrap().as_deref(),
            Some("shared")
        );
    }

    #[tokio::test]
    async fn test_len_is_backend_wide_scoped_len_is_not() {
        let storage = Storage::in_memory();
        let ns1 = storage.scoped("ns1:");
        let ns2 = storage.scoped("ns2:");

        ns1.set_item("a", &1).await.unwrap();
        ns1.set_item("b", &2).await.unwrap();
        ns2.set_item("a", &3).await.unwrap();

        assert_eq!(ns1.len().await.unwrap(), 3);
        assert_eq!(ns2.len().await.unwrap(), 3);
        assert_eq!(ns1.scoped_len().await.unwrap(), 2);
        assert_eq!(ns2.scoped_len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear_wipes_every_namespace() {
        let storage = Storage::in_memory();
        let ns1 = storage.scoped("ns1:");
        let ns2 = storage.scoped("ns2:");

        ns1.set_item("a", &1).await.unwrap();
        ns2.set_item("a", &2).await.unwrap();

        ns1.clear().await.unwrap();

        assert_eq!(ns1.get_item::<i64>("a").await.unwrap(), None);
        assert_eq!(ns2.get_item::<i64>("a").await.unwrap(), None);
        assert_eq!(storage.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_prefix_is_the_identity_view() {
        let storage = Storage::in_memory();
        let view = storage.scoped("");

        view.set_item("k", &true).await.unwrap();

        assert_eq!(storage.get_item::<bool>("k").await.unwrap(), Some(true));
        assert_eq!(view.scoped_len().await.unwrap(), view.len().await.unwrap());
    }
}
