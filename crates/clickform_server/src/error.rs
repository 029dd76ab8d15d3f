//! Boundary error type and its HTTP mapping.
//!
//! Store failures collapse into one opaque 500; the concrete kind has already
//! been logged by the service before it reaches this layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clickform_core::{IngestionError, UploadError};
use log::{error, warn};
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Internal Server Error")]
    Ingestion(#[from] IngestionError),

    #[error("{}", upload_message(.0))]
    Upload(#[from] UploadError),

    #[error("Internal Server Error")]
    Task(#[from] JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Ingestion(_) | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upload(err) => match err {
                UploadError::Parse(_) | UploadError::MissingField(_) => StatusCode::BAD_REQUEST,
                UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                UploadError::Read(_) | UploadError::Create(_) | UploadError::Write(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

fn upload_message(err: &UploadError) -> &'static str {
    match err {
        UploadError::Parse(_) => "Unable to parse form",
        UploadError::MissingField(_) => "Unable to get file",
        UploadError::TooLarge { .. } => "File too large",
        UploadError::Read(_) => "Unable to read file",
        UploadError::Create(_) => "Unable to create file",
        UploadError::Write(_) => "Unable to save file",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Task(err) => error!(
                "event=request_failed module=server status=error error_code=task_failed error={err}"
            ),
            AppError::Upload(err @ (UploadError::Parse(_) | UploadError::MissingField(_))) => warn!(
                "event=upload_rejected module=server status=error error_code={} error={err}",
                err.error_code()
            ),
            _ => {}
        }

        (self.status(), self.to_string()).into_response()
    }
}
