//! Record domain model.
//!
//! # Responsibility
//! - Define the name/email entry persisted by a submission.
//!
//! # Invariants
//! - `id` is unique within one store and never reused.
//! - `id` values grow monotonically in creation order.
//! - `name` and `email` are stored exactly as submitted, including empty values.

use serde::{Deserialize, Serialize};

/// Store-assigned identity of a record.
///
/// Matches the SQLite `INTEGER PRIMARY KEY` width.
pub type RecordId = i64;

/// A persisted name/email entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Assigned by the store at insert time.
    pub id: RecordId,
    pub name: String,
    pub email: String,
}

impl Record {
    /// Builds a record for an identity the store has already assigned.
    ///
    /// Only store implementations should call this; callers never pick ids.
    pub fn new(id: RecordId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
