//! Backend selection: resolve exactly one backend per storage handle.
//!
//! Policy, in order: an embedder-provided native store that passes the
//! capability probe, then a SQLite file at a conventional path, then an
//! in-memory map. Selection runs once; the choice is fixed for the life of
//! the handle and existing data is never migrated between backends.

use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::{probe, Backend, ProbeResult};
use crate::memory::MemoryBackend;
use crate::sqlite::SqliteBackend;

/// Conventional location of the file-backed store.
pub const DEFAULT_STORE_PATH: &str = "./satchel-storage/store.db";

/// Which backend the selector resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Persistent store supplied by the embedding host.
    Native,
    /// SQLite file on local disk.
    File,
    /// In-memory map; nothing persists past the process.
    Memory,
}

/// Inputs to backend selection.
pub struct SelectOptions {
    /// Persistent store supplied by the embedding host, if any.
    ///
    /// Used only if it passes the capability probe.
    pub native: Option<Arc<dyn Backend>>,

    /// Location for the file-backed store. `None` means
    /// [`DEFAULT_STORE_PATH`].
    pub path: Option<PathBuf>,

    /// Whether the file-backed tier may be tried at all. Hosts without
    /// file I/O set this to `false`.
    pub allow_file: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            native: None,
            path: None,
            allow_file: true,
        }
    }
}

/// Resolve a backend according to the selection policy.
///
/// Never fails: the in-memory backend is the unconditional fallback.
pub async fn select_backend(options: SelectOptions) -> (Arc<dyn Backend>, BackendKind) {
    if let Some(native) = options.native {
        match probe(native.as_ref()).await {
            ProbeResult::Available => {
                tracing::debug!("selected native backend");
                return (native, BackendKind::Native);
            }
            outcome => {
                tracing::warn!(?outcome, "native store unusable, falling back");
            }
        }
    }

    if options.allow_file {
        let path = options
            .path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        match SqliteBackend::open(&path) {
            Ok(backend) => {
                let backend: Arc<dyn Backend> = Arc::new(backend);
                if probe(backend.as_ref()).await.is_usable() {
                    tracing::debug!(path = %path.display(), "selected file backend");
                    return (backend, BackendKind::File);
                }
                tracing::warn!(path = %path.display(), "file store unusable, falling back");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot open file store, falling back");
            }
        }
    }

    tracing::debug!("selected in-memory backend");
    (Arc::new(MemoryBackend::new()), BackendKind::Memory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_usable_native_store_wins() {
        let native: Arc<dyn Backend> = Arc::new(MemoryBackend::new());

        let (_, kind) = select_backend(SelectOptions {
            native: Some(native),
            path: None,
            allow_file: false,
        })
        .await;

        assert_eq!(kind, BackendKind::Native);
    }

    #[tokio::test]
    async fn test_full_native_store_falls_through() {
        let native = MemoryBackend::with_capacity(1);
        native.put("existing", "1").await.unwrap();

        let (_, kind) = select_backend(SelectOptions {
            native: Some(Arc::new(native)),
            path: None,
            allow_file: false,
        })
        .await;

        assert_eq!(kind, BackendKind::Memory);
    }

    #[tokio::test]
    async fn test_file_tier_selected_when_path_opens() {
        let dir = tempfile::tempdir().unwrap();

        let (backend, kind) = select_backend(SelectOptions {
            native: None,
            path: Some(dir.path().join("store.db")),
            allow_file: true,
        })
        .await;

        assert_eq!(kind, BackendKind::File);

        // Probe left nothing behind
        assert_eq!(backend.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_memory_is_the_last_resort() {
        let (_, kind) = select_backend(SelectOptions {
            native: None,
            path: None,
            allow_file: false,
        })
        .await;

        assert_eq!(kind, BackendKind::Memory);
    }
}
