//! Store session contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the two store primitives the pipeline needs: upsert one
//!   document by identity, and atomically increment a named sequence.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `increment_sequence` is a single atomic statement; no client-side
//!   locking is layered on top.
//! - Store failures propagate unchanged; nothing is retried here.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteSession;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for document writes and counter increments.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Document reached its write without an addressable identity.
    MissingIdentity(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize document body: {err}"),
            Self::MissingIdentity(type_name) => {
                write!(f, "document `{type_name}` has no identity to upsert by")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::MissingIdentity(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Active store handle threaded through every save; owns no global state.
pub trait StoreSession {
    /// Inserts or replaces one document body by `(collection, id)`.
    fn upsert(&mut self, collection: &str, id: &str, body: &serde_json::Value)
        -> StoreResult<()>;

    /// Atomic read-increment-write for the named sequence, creating the
    /// record at post-increment value 1 when absent. Returns the
    /// post-increment value, or `None` if the store yielded no row.
    fn increment_sequence(&mut self, name: &str) -> StoreResult<Option<i64>>;
}
