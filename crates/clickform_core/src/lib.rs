//! Core record-ingestion logic for clickform.
//! This crate owns record storage, submission handling and fragment rendering;
//! HTTP routing lives in `clickform_server`.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;
pub mod upload;

pub use config::{AppConfig, ConfigError, ConfigResult, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{Record, RecordId};
pub use render::escape::escape_html;
pub use render::fragment::{render, render_listing, Fragment, ResponseKind};
pub use repo::build_store;
pub use repo::memory_store::MemoryRecordStore;
pub use repo::record_store::{RecordStore, StoreError, StoreResult};
pub use repo::sqlite_store::{SqliteRecordStore, SqliteTarget};
pub use service::ingestion_service::{Confirmation, IngestionError, IngestionService};
pub use upload::sink::{UploadError, UploadResult, UploadSink};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
