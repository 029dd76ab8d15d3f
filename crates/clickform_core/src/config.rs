//! Startup configuration.
//!
//! # Responsibility
//! - Parse an optional `.env` file into a key/value map.
//! - Overlay process environment variables and build a typed `AppConfig`.
//!
//! # Invariants
//! - Configuration is resolved once at startup; request handlers never read
//!   the environment.
//! - The process environment is never mutated.
//! - A missing env file is not an error; an unreadable one is.

use crate::db::schema::DEFAULT_FIELD_MAX_CHARS;
use crate::logging::default_log_level;
use crate::repo::sqlite_store::SqliteTarget;
use crate::upload::sink::{DEFAULT_UPLOAD_LIMIT_BYTES, DEFAULT_UPLOAD_PATH};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4242";

pub const KEY_BIND_ADDR: &str = "BIND_ADDR";
pub const KEY_STATIC_DIR: &str = "STATIC_DIR";
pub const KEY_STORE_BACKEND: &str = "STORE_BACKEND";
pub const KEY_DB_PATH: &str = "DB_PATH";
pub const KEY_DB_FIELD_MAX_CHARS: &str = "DB_FIELD_MAX_CHARS";
pub const KEY_UPLOAD_PATH: &str = "UPLOAD_PATH";
pub const KEY_UPLOAD_LIMIT_BYTES: &str = "UPLOAD_LIMIT_BYTES";
pub const KEY_LOG_LEVEL: &str = "LOG_LEVEL";
pub const KEY_LOG_DIR: &str = "LOG_DIR";

const KNOWN_KEYS: &[&str] = &[
    KEY_BIND_ADDR,
    KEY_STATIC_DIR,
    KEY_STORE_BACKEND,
    KEY_DB_PATH,
    KEY_DB_FIELD_MAX_CHARS,
    KEY_UPLOAD_PATH,
    KEY_UPLOAD_LIMIT_BYTES,
    KEY_LOG_LEVEL,
    KEY_LOG_DIR,
];

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    /// The env file exists but could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A key required by the selected options is absent.
    Missing(&'static str),
    /// A key is present but its value cannot be used.
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read env file `{}`: {source}", path.display())
            }
            Self::Missing(key) => write!(f, "missing required setting `{key}`"),
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid value `{value}` for `{key}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Missing(_) | Self::Invalid { .. } => None,
        }
    }
}

/// Backend selection for the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    Sqlite(SqliteTarget),
}

/// Fully resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `index.html` and `otherpage.html`.
    pub static_dir: PathBuf,
    pub store: StoreConfig,
    pub upload_path: PathBuf,
    pub upload_limit_bytes: u64,
    pub log_level: String,
    /// `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from `env_file` (if present) and the process
    /// environment. Process variables take precedence over file entries.
    pub fn load(env_file: impl AsRef<Path>) -> ConfigResult<Self> {
        let mut vars = read_env_file(env_file.as_ref())?;
        for key in KNOWN_KEYS {
            if let Ok(value) = std::env::var(key) {
                vars.insert((*key).to_string(), value);
            }
        }
        Self::from_vars(&vars)
    }

    /// Builds configuration from an explicit key/value map.
    pub fn from_vars(vars: &HashMap<String, String>) -> ConfigResult<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = parse_value::<SocketAddr>(
            KEY_BIND_ADDR,
            get(KEY_BIND_ADDR).unwrap_or(DEFAULT_BIND_ADDR),
        )?;

        let store = match get(KEY_STORE_BACKEND).unwrap_or("memory") {
            "memory" => StoreConfig::Memory,
            "sqlite" => {
                let path = get(KEY_DB_PATH).ok_or(ConfigError::Missing(KEY_DB_PATH))?;
                let field_max_chars = match get(KEY_DB_FIELD_MAX_CHARS) {
                    Some(value) => parse_value::<u32>(KEY_DB_FIELD_MAX_CHARS, value)?,
                    None => DEFAULT_FIELD_MAX_CHARS,
                };
                if field_max_chars == 0 {
                    return Err(ConfigError::Invalid {
                        key: KEY_DB_FIELD_MAX_CHARS,
                        value: "0".to_string(),
                        reason: "must be at least 1".to_string(),
                    });
                }
                StoreConfig::Sqlite(SqliteTarget {
                    path: PathBuf::from(path),
                    field_max_chars,
                })
            }
            other => {
                return Err(ConfigError::Invalid {
                    key: KEY_STORE_BACKEND,
                    value: other.to_string(),
                    reason: "expected `memory` or `sqlite`".to_string(),
                })
            }
        };

        let upload_limit_bytes = match get(KEY_UPLOAD_LIMIT_BYTES) {
            Some(value) => parse_value::<u64>(KEY_UPLOAD_LIMIT_BYTES, value)?,
            None => DEFAULT_UPLOAD_LIMIT_BYTES,
        };

        Ok(Self {
            bind_addr,
            static_dir: PathBuf::from(get(KEY_STATIC_DIR).unwrap_or(".")),
            store,
            upload_path: PathBuf::from(get(KEY_UPLOAD_PATH).unwrap_or(DEFAULT_UPLOAD_PATH)),
            upload_limit_bytes,
            log_level: get(KEY_LOG_LEVEL)
                .unwrap_or(default_log_level())
                .to_string(),
            log_dir: get(KEY_LOG_DIR).map(PathBuf::from),
        })
    }
}

/// Parses `KEY=VALUE` lines.
///
/// Blank lines and lines starting with `#` are skipped, lines without `=`
/// are ignored, and keys and values are trimmed. Later entries win.
pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

fn read_env_file(path: &Path) -> ConfigResult<HashMap<String, String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(parse_env_file(&contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    value.parse().map_err(|err: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::parse_env_file;

    #[test]
    fn parse_env_file_skips_comments_and_malformed_lines() {
        let vars = parse_env_file("# comment\n\nDB_PATH = /tmp/x.db \nnot a pair\nA=b=c\n");

        assert_eq!(vars.len(), 2);
        assert_eq!(vars["DB_PATH"], "/tmp/x.db");
        assert_eq!(vars["A"], "b=c");
    }
}
