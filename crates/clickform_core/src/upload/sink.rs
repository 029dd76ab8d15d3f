//! Upload sink implementation and error taxonomy.

use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default cap on one upload: 10 MiB.
pub const DEFAULT_UPLOAD_LIMIT_BYTES: u64 = 10 << 20;
/// Default destination, relative to the working directory.
pub const DEFAULT_UPLOAD_PATH: &str = "uploaded_file";
/// Multipart field that carries the file.
pub const UPLOAD_FIELD_NAME: &str = "file";

pub type UploadResult<T> = Result<T, UploadError>;

#[derive(Debug)]
pub enum UploadError {
    /// The multipart body could not be parsed.
    Parse(String),
    /// The request had no part named `field`.
    MissingField(String),
    /// The payload exceeded `limit` bytes.
    TooLarge { limit: u64 },
    /// Reading the incoming payload failed.
    Read(io::Error),
    /// The destination could not be created.
    Create(io::Error),
    /// Writing to the destination failed part-way.
    Write(io::Error),
}

impl UploadError {
    /// Stable machine-readable code used in log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "upload_parse_failed",
            Self::MissingField(_) => "upload_field_missing",
            Self::TooLarge { .. } => "upload_too_large",
            Self::Read(_) => "upload_read_failed",
            Self::Create(_) => "upload_create_failed",
            Self::Write(_) => "upload_write_failed",
        }
    }
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "unable to parse upload: {message}"),
            Self::MissingField(field) => write!(f, "upload field `{field}` is missing"),
            Self::TooLarge { limit } => write!(f, "upload exceeds limit of {limit} bytes"),
            Self::Read(err) => write!(f, "failed to read upload: {err}"),
            Self::Create(err) => write!(f, "failed to create upload destination: {err}"),
            Self::Write(err) => write!(f, "failed to write upload destination: {err}"),
        }
    }
}

impl Error for UploadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Create(err) | Self::Write(err) => Some(err),
            Self::Parse(_) | Self::MissingField(_) | Self::TooLarge { .. } => None,
        }
    }
}

/// Writes uploaded payloads to one fixed path.
#[derive(Debug, Clone)]
pub struct UploadSink {
    destination: PathBuf,
    limit_bytes: u64,
}

impl UploadSink {
    pub fn new(destination: impl Into<PathBuf>, limit_bytes: u64) -> Self {
        Self {
            destination: destination.into(),
            limit_bytes,
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn limit_bytes(&self) -> u64 {
        self.limit_bytes
    }

    /// Reads `reader` to the end and stores it at the destination.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    /// - `TooLarge` when the payload is over the limit; nothing is written.
    /// - `Read` when the source fails; nothing is written.
    /// - `Create` / `Write` when the destination cannot be created or filled.
    pub fn accept(&self, reader: impl Read) -> UploadResult<u64> {
        let started_at = Instant::now();
        let result = self.read_capped(reader).and_then(|payload| self.store(&payload));

        match &result {
            Ok(written) => info!(
                "event=upload_store module=upload status=ok bytes={} duration_ms={}",
                written,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=upload_store module=upload status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.error_code(),
                err
            ),
        }
        result
    }

    fn read_capped(&self, reader: impl Read) -> UploadResult<Vec<u8>> {
        let mut payload = Vec::new();
        reader
            .take(self.limit_bytes.saturating_add(1))
            .read_to_end(&mut payload)
            .map_err(UploadError::Read)?;

        if payload.len() as u64 > self.limit_bytes {
            return Err(UploadError::TooLarge {
                limit: self.limit_bytes,
            });
        }
        Ok(payload)
    }

    fn store(&self, payload: &[u8]) -> UploadResult<u64> {
        let mut file = File::create(&self.destination).map_err(UploadError::Create)?;
        file.write_all(payload).map_err(UploadError::Write)?;
        file.flush().map_err(UploadError::Write)?;
        Ok(payload.len() as u64)
    }
}
