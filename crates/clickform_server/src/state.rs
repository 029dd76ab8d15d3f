use std::path::PathBuf;
use std::sync::Arc;

use clickform_core::{build_store, AppConfig, IngestionService, RecordStore, UploadSink};

/// Shared per-process state, built once at startup.
pub struct AppState {
    pub ingestion: IngestionService<Arc<dyn RecordStore>>,
    pub upload_sink: UploadSink,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        upload_sink: UploadSink,
        static_dir: impl Into<PathBuf>,
    ) -> Arc<Self> {
        Arc::new(Self {
            ingestion: IngestionService::new(store),
            upload_sink,
            static_dir: static_dir.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Arc<Self> {
        Self::new(
            build_store(&config.store),
            UploadSink::new(&config.upload_path, config.upload_limit_bytes),
            &config.static_dir,
        )
    }
}
