//! Persistence adapter for the case document.
//!
//! # Responsibility
//! - Define the key/value blob contract the store writes through to.
//! - Provide SQLite-backed and in-memory implementations.
//! - Encode/decode the full [`CaseData`] document as JSON.
//!
//! # Invariants
//! - One key holds the whole document; partial writes never happen.
//! - Decoding never panics; malformed input surfaces as `PersistError::Decode`.

use crate::db::DbError;
use crate::store::CaseData;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used by the dashboard for the case document.
pub const DEFAULT_STORAGE_KEY: &str = "sjed-app-data";

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(Debug)]
pub enum PersistError {
    /// Backend could not be reached or rejected the operation.
    Db(DbError),
    /// Backend refused the write for a non-database reason.
    Unavailable(String),
    Encode(serde_json::Error),
    /// Stored blob is not a valid case document.
    Decode(serde_json::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::Encode(err) => write!(f, "failed to encode case document: {err}"),
            Self::Decode(err) => write!(f, "corrupt case document: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value blob backend the store writes through to.
pub trait BlobStore {
    /// Returns the blob under `key`, or `None` when nothing was stored yet.
    fn read_blob(&self, key: &str) -> PersistResult<Option<String>>;
    /// Replaces the blob under `key`.
    fn write_blob(&self, key: &str, value: &str) -> PersistResult<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for &T {
    fn read_blob(&self, key: &str) -> PersistResult<Option<String>> {
        (**self).read_blob(key)
    }

    fn write_blob(&self, key: &str, value: &str) -> PersistResult<()> {
        (**self).write_blob(key, value)
    }
}

/// Serializes the full case document.
pub fn encode_case_data(data: &CaseData) -> PersistResult<String> {
    serde_json::to_string(data).map_err(PersistError::Encode)
}

/// Parses a stored case document.
pub fn decode_case_data(raw: &str) -> PersistResult<CaseData> {
    serde_json::from_str(raw).map_err(PersistError::Decode)
}

/// SQLite-backed blob store over the `app_blobs` table.
///
/// Each write bumps the row's `revision`, so callers can observe how many
/// write-throughs reached disk.
pub struct SqliteBlobStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobStore<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Returns how many times `key` has been written, or `None` if never.
    pub fn revision(&self, key: &str) -> PersistResult<Option<i64>> {
        let revision = self
            .conn
            .query_row(
                "SELECT revision FROM app_blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(revision)
    }
}

impl BlobStore for SqliteBlobStore<'_> {
    fn read_blob(&self, key: &str) -> PersistResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM app_blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_blob(&self, key: &str, value: &str) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO app_blobs (key, value, revision)
             VALUES (?1, ?2, 1)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                revision = app_blobs.revision + 1,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-process blob store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RefCell<BTreeMap<String, String>>,
    writes: Cell<u64>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `value` under `key`.
    pub fn with_blob(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        store.blobs.borrow_mut().insert(key.into(), value.into());
        store
    }

    /// Returns a copy of the blob under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }

    /// Number of successful writes since construction.
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read_blob(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write_blob(&self, key: &str, value: &str) -> PersistResult<()> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_case_data, BlobStore, MemoryBlobStore, PersistError, SqliteBlobStore};
    use crate::db::open_db_in_memory;

    #[test]
    fn sqlite_blob_store_upserts_and_counts_revisions() {
        let conn = open_db_in_memory().unwrap();
        let blobs = SqliteBlobStore::new(&conn);

        assert_eq!(blobs.read_blob("k").unwrap(), None);
        assert_eq!(blobs.revision("k").unwrap(), None);

        blobs.write_blob("k", "one").unwrap();
        blobs.write_blob("k", "two").unwrap();

        assert_eq!(blobs.read_blob("k").unwrap().as_deref(), Some("two"));
        assert_eq!(blobs.revision("k").unwrap(), Some(2));
    }

    #[test]
    fn memory_blob_store_tracks_writes() {
        let blobs = MemoryBlobStore::with_blob("k", "seeded");
        assert_eq!(blobs.read_blob("k").unwrap().as_deref(), Some("seeded"));
        assert_eq!(blobs.write_count(), 0);

        blobs.write_blob("k", "next").unwrap();
        assert_eq!(blobs.get("k").as_deref(), Some("next"));
        assert_eq!(blobs.write_count(), 1);
    }

    #[test]
    fn decode_rejects_garbage_without_panicking() {
        let err = decode_case_data("{not json").unwrap_err();
        assert!(matches!(err, PersistError::Decode(_)));
    }
}
