//! Record store contract and its two implementations.
//!
//! # Responsibility
//! - Define the `RecordStore` capability set used by the ingestion service.
//! - Provide an in-process store and a SQLite-backed store behind one trait.
//! - Select the implementation from configuration at startup.
//!
//! # Invariants
//! - Ids handed out by one store are unique and strictly increasing.
//! - A failed insert leaves no record behind.

use crate::config::StoreConfig;
use std::sync::Arc;

pub mod memory_store;
pub mod record_store;
pub mod sqlite_store;

use memory_store::MemoryRecordStore;
use record_store::RecordStore;
use sqlite_store::SqliteRecordStore;

/// Builds the store selected by `config`.
///
/// The returned handle is meant to be created once per process and shared by
/// every request handler.
pub fn build_store(config: &StoreConfig) -> Arc<dyn RecordStore> {
    match config {
        StoreConfig::Memory => Arc::new(MemoryRecordStore::new()),
        StoreConfig::Sqlite(target) => Arc::new(SqliteRecordStore::new(target.clone())),
    }
}
