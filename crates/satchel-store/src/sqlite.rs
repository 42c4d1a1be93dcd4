//! SQLite implementation of the Backend trait.
//!
//! The file-backed backend for hosts that have file I/O but no native
//! persistent store. Uses rusqlite with bundled SQLite, wrapped in async via
//! tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::backend::Backend;
use crate::error::{Result, StoreError};
use crate::migration;

/// SQLite-based backend.
///
/// The whole store is one `entries` table in a single database file.
/// Thread-safe via internal Mutex; every operation runs on the blocking
/// pool to avoid stalling the async runtime.
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBackend {
    /// Open the database at `path`.
    ///
    /// Creates the file, its parent directory, and the schema as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing the SQL path without touching disk.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Task(format!("connection lock poisoned: {}", e)))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Task(format!("spawn_blocking failed: {}", e)))?
    }
}

/// Map a write failure to the store taxonomy, surfacing quota conditions.
fn write_error(e: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(ffi, _) = &e {
        // SQLITE_FULL: the database or disk is out of space
        if ffi.code == ErrorCode::DiskFull {
            return StoreError::QuotaExceeded;
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO entries (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value, now_millis()],
            )
            .map_err(write_error)?;
            Ok(())
        })
        .await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();

        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT value FROM entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();

        self.with_conn(move |conn| {
            conn.execute("DELETE FROM entries WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM entries", [])?;
            Ok(())
        })
        .await
    }

    async fn key_at(&self, index: usize) -> Result<Option<String>> {
        let offset = index as i64;

        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT key FROM entries ORDER BY key LIMIT 1 OFFSET ?1",
                params![offset],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn len(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
            Ok(count as usize)
        })
        .await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM entries ORDER BY key")?;
            let keys = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(keys)
        })
        .await
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
