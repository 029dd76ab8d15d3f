use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use clickform_core::upload::sink::UPLOAD_FIELD_NAME;
use clickform_core::{render, render_listing, Fragment, ResponseKind, UploadError};
use serde::Deserialize;
use tokio::task::spawn_blocking;

use crate::{error::AppError, state::AppState};

/// Form body posted to `/submit`. Absent fields read as empty strings.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

pub async fn clicked_handler() -> Response {
    html(render(ResponseKind::ClickAcknowledged))
}

pub async fn test_handler() -> Response {
    html(render(ResponseKind::GenericAcknowledged))
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SubmitForm>,
) -> Result<Response, AppError> {
    spawn_blocking(move || state.ingestion.submit(&form.name, &form.email)).await??;

    Ok(html(render(ResponseKind::FormSubmitted)))
}

pub async fn users_handler(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let records = spawn_blocking(move || state.ingestion.records()).await??;

    Ok(html(render_listing(&records)))
}

pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let mut multipart = multipart.map_err(|rejection| UploadError::Parse(rejection.body_text()))?;
    let payload = read_file_field(&mut multipart, state.upload_sink.limit_bytes()).await?;

    spawn_blocking(move || state.upload_sink.accept(payload.as_slice())).await??;

    Ok(html(render(ResponseKind::UploadAcknowledged)))
}

/// Buffers the `file` part, giving up as soon as it grows past `limit`.
async fn read_file_field(multipart: &mut Multipart, limit: u64) -> Result<Vec<u8>, UploadError> {
    let to_upload_error = |err: MultipartError| {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge { limit }
        } else {
            UploadError::Parse(err.body_text())
        }
    };

    while let Some(mut field) = multipart.next_field().await.map_err(to_upload_error)? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let mut payload = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(to_upload_error)? {
            if (payload.len() + chunk.len()) as u64 > limit {
                return Err(UploadError::TooLarge { limit });
            }
            payload.extend_from_slice(&chunk);
        }
        return Ok(payload);
    }

    Err(UploadError::MissingField(UPLOAD_FIELD_NAME.to_string()))
}

fn html(fragment: Fragment) -> Response {
    let content_type = fragment.content_type();
    ([(CONTENT_TYPE, content_type)], fragment.into_string()).into_response()
}
