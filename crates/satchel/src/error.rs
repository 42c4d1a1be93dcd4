//! Error types for the storage facade.

use satchel_store::StoreError;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected the operation (quota, database, I/O).
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// A value could not be serialized to JSON.
    #[error("cannot serialize value for key {key:?}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored text for a key is not valid JSON.
    ///
    /// Should not occur under normal use, since every write goes through
    /// the serializing path.
    #[error("stored value for key {key:?} is not valid JSON: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
