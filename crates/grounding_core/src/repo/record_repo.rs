//! Key/value record repository contracts.
//!
//! # Responsibility
//! - Provide read/replace/remove over named records.
//! - Offer a SQLite backend for real use and an in-memory backend for tests
//!   and storage-less environments.
//!
//! # Invariants
//! - `write_record` is a single full replace; there is no partial update.
//! - `remove_record` on a missing key is not an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence.
#[derive(Debug)]
pub enum RepoError {
    InvalidKey(String),
    Db(DbError),
    /// Backend refused the write (quota, read-only, disabled storage).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid record key: `{key}`"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "record storage unavailable: {reason}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for named records.
pub trait RecordRepository {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>>;
    fn write_record(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Returns whether a record existed.
    fn remove_record(&self, key: &str) -> RepoResult<bool>;
}

impl<R: RecordRepository + ?Sized> RecordRepository for &R {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_record(key)
    }

    fn write_record(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_record(key, value)
    }

    fn remove_record(&self, key: &str) -> RepoResult<bool> {
        (**self).remove_record(key)
    }
}

impl<R: RecordRepository + ?Sized> RecordRepository for Box<R> {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_record(key)
    }

    fn write_record(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_record(key, value)
    }

    fn remove_record(&self, key: &str) -> RepoResult<bool> {
        (**self).remove_record(key)
    }
}

/// SQLite-backed record repository.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        let key = validate_key(key)?;
        let value = self
            .conn
            .query_row("SELECT value FROM records WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_record(&self, key: &str, value: &str) -> RepoResult<()> {
        let key = validate_key(key)?;
        self.conn.execute(
            "INSERT INTO records (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_record(&self, key: &str) -> RepoResult<bool> {
        let key = validate_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM records WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

/// In-process record repository.
///
/// Single-threaded by construction (`RefCell`), matching the session model.
#[derive(Debug, Default)]
pub struct MemoryRecordRepository {
    records: RefCell<BTreeMap<String, String>>,
}

impl MemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl RecordRepository for MemoryRecordRepository {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        let key = validate_key(key)?;
        Ok(self.records.borrow().get(key).cloned())
    }

    fn write_record(&self, key: &str, value: &str) -> RepoResult<()> {
        let key = validate_key(key)?;
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_record(&self, key: &str) -> RepoResult<bool> {
        let key = validate_key(key)?;
        Ok(self.records.borrow_mut().remove(key).is_some())
    }
}

fn validate_key(key: &str) -> RepoResult<&str> {
    if key.trim().is_empty() {
        return Err(RepoError::InvalidKey(key.to_string()));
    }
    Ok(key)
}
