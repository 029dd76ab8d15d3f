//! Store contract shared by every backend.
//!
//! # Responsibility
//! - Define create-if-absent, insert and list operations over records.
//! - Classify backend failures by the phase in which they happened.
//!
//! # Invariants
//! - `insert` is atomic with respect to concurrent `insert` and `list` calls.
//! - `list` returns records in id order.

use crate::db::DbError;
use crate::model::record::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store failure, tagged by the phase that failed.
#[derive(Debug)]
pub enum StoreError {
    /// The backing connection could not be opened.
    Unavailable(DbError),
    /// Conditional table creation failed.
    Schema(DbError),
    /// The insert was rejected; nothing was written.
    Write(DbError),
    /// Enumerating stored records failed.
    Read(DbError),
}

impl StoreError {
    /// Stable machine-readable code used in log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "store_unavailable",
            Self::Schema(_) => "schema_failure",
            Self::Write(_) => "write_failure",
            Self::Read(_) => "read_failure",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "store unavailable: {err}"),
            Self::Schema(err) => write!(f, "failed to create users table: {err}"),
            Self::Write(err) => write!(f, "failed to insert record: {err}"),
            Self::Read(err) => write!(f, "failed to list records: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) | Self::Schema(err) | Self::Write(err) | Self::Read(err) => {
                Some(err)
            }
        }
    }
}

/// Persistence contract for submitted records.
///
/// Implementations are shared across request handlers, so they must be
/// `Send + Sync` and guard any interior state themselves.
pub trait RecordStore: Send + Sync {
    /// Ensures the backing structure exists. Safe to call on every request.
    fn create_table_if_absent(&self) -> StoreResult<()>;

    /// Assigns the next id, stores the record and returns it.
    fn insert(&self, name: &str, email: &str) -> StoreResult<Record>;

    /// Returns a consistent snapshot of every stored record in id order.
    fn list(&self) -> StoreResult<Vec<Record>>;
}

impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn create_table_if_absent(&self) -> StoreResult<()> {
        (**self).create_table_if_absent()
    }

    fn insert(&self, name: &str, email: &str) -> StoreResult<Record> {
        (**self).insert(name, email)
    }

    fn list(&self) -> StoreResult<Vec<Record>> {
        (**self).list()
    }
}
