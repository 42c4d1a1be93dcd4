//! Error types for the backend layer.

use thiserror::Error;

/// Errors that can occur when talking to a backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend has no room for new entries.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// The backend rejected a write for a reason other than quota.
    #[error("backend write rejected: {0}")]
    Write(String),

    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A blocking storage task did not run to completion.
    #[error("storage task failed: {0}")]
    Task(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, StoreError>;
