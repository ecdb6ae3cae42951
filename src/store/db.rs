//! Record store trait and SQLite implementation.
//!
//! The whole photo collection is stored as one JSON document in a single
//! value slot, so every save replaces the collection wholesale and a load
//! always sees a complete snapshot.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};

use super::error::StoreError;
use super::schema;
use crate::journal::PhotoRecord;

/// Slot key for the photo collection, carried over from earlier releases.
pub const STORAGE_KEY: &str = "@camera_notes_photos_v2";

/// Trait for durable storage of the photo collection.
///
/// This trait is object-safe and can be used with `Arc<dyn RecordStore>`.
/// `load` degrades an unreadable stored document to an empty collection;
/// only a real storage failure is an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the full collection, newest first.
    async fn load(&self) -> Result<Vec<PhotoRecord>, StoreError>;

    /// Replace the stored collection with `records`.
    async fn save(&self, records: &[PhotoRecord]) -> Result<(), StoreError>;
}

/// SQLite implementation of the record store.
pub struct SqliteRecordStore {
    /// Wrapped in Mutex because rusqlite::Connection is not Sync.
    conn: Mutex<Connection>,
    /// Path to the database file (for error messages).
    path: PathBuf,
}

impl std::fmt::Debug for SqliteRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRecordStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteRecordStore {
    /// Open or create a database at the given path.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let path = path.to_path_buf();
        let path_clone = path.clone();

        let conn = tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path_clone).map_err(|e| StoreError::Open {
                path: path_clone.clone(),
                source: e,
            })?;

            // WAL keeps the occasional concurrent reader cheap
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(StoreError::Migration)?;
            conn.pragma_update(None, "synchronous", "NORMAL")
                .map_err(StoreError::Migration)?;

            schema::migrate(&conn)?;

            Ok::<_, StoreError>(conn)
        })
        .await??;

        tracing::debug!(path = %path.display(), "Opened record store");
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Open an in-memory database (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source: e,
        })?;
        schema::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: PathBuf::from(":memory:"),
        })
    }

    /// Write a raw value into the collection slot, bypassing serialization.
    #[cfg(test)]
    fn raw_put(&self, value: &str) -> Result<(), StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Query(e.to_string()))?;
        conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![STORAGE_KEY, value],
        )
        .map_err(StoreError::query)?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn load(&self) -> Result<Vec<PhotoRecord>, StoreError> {
        // Query in a separate scope so the MutexGuard is dropped before any await
        let value: Option<String> = {
            let conn = self
                .conn
                .lock()
                .map_err(|e| StoreError::Query(e.to_string()))?;

            conn.query_row(
                "SELECT value FROM slots WHERE key = ?1",
                [STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::query)?
        };

        let value = match value {
            Some(value) => value,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str(&value) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Stored records are unreadable, starting with an empty journal"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, records: &[PhotoRecord]) -> Result<(), StoreError> {
        let value = serde_json::to_string(records)?;

        {
            let conn = self
                .conn
                .lock()
                .map_err(|e| StoreError::Query(e.to_string()))?;

            conn.execute(
                "INSERT INTO slots (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                rusqlite::params![STORAGE_KEY, value],
            )
            .map_err(StoreError::query)?;
        }

        tracing::debug!(count = records.len(), "Saved journal");
        Ok(())
    }
}
