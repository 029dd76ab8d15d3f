//! Form submission use-case.
//!
//! # Responsibility
//! - Persist one name/email submission through a `RecordStore`.
//! - Log the concrete failure kind while callers only see success/failure.
//!
//! # Invariants
//! - A successful `submit` creates exactly one record; a failed one creates none.
//! - Field values are accepted as-is; only presence is checked upstream.
//! - Field values never appear in log output.

use crate::model::record::Record;
use crate::repo::record_store::{RecordStore, StoreError, StoreResult};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Acknowledgement of a persisted submission.
///
/// Carries no record data; it only selects the confirmation fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation;

/// Service error for submission use-cases.
#[derive(Debug)]
pub enum IngestionError {
    /// Submission rejected before reaching the store. Not produced today.
    Validation(String),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl IngestionError {
    /// Stable machine-readable code used in log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failure",
            Self::Store(err) => err.error_code(),
        }
    }
}

impl Display for IngestionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "invalid submission: {message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IngestionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for IngestionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case service wrapping a record store.
pub struct IngestionService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> IngestionService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persists one submission.
    ///
    /// # Contract
    /// - Ensures the backing table exists, then inserts.
    /// - Does not return the created record, only an acknowledgement.
    pub fn submit(&self, name: &str, email: &str) -> Result<Confirmation, IngestionError> {
        let started_at = Instant::now();
        let result = self.persist(name, email);

        match result {
            Ok(record) => {
                info!(
                    "event=form_submit module=service status=ok id={} duration_ms={}",
                    record.id,
                    started_at.elapsed().as_millis()
                );
                Ok(Confirmation)
            }
            Err(err) => {
                let err = IngestionError::from(err);
                error!(
                    "event=form_submit module=service status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.error_code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Returns every stored record in creation order.
    pub fn records(&self) -> Result<Vec<Record>, IngestionError> {
        let result = self
            .store
            .create_table_if_absent()
            .and_then(|()| self.store.list());

        result.map_err(|err| {
            let err = IngestionError::from(err);
            error!(
                "event=record_list module=service status=error error_code={} error={}",
                err.error_code(),
                err
            );
            err
        })
    }

    fn persist(&self, name: &str, email: &str) -> StoreResult<Record> {
        self.store.create_table_if_absent()?;
        self.store.insert(name, email)
    }
}
