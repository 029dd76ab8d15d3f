use clickform_core::config::{parse_env_file, DEFAULT_BIND_ADDR};
use clickform_core::{AppConfig, ConfigError, SqliteTarget, StoreConfig};
use std::collections::HashMap;
use std::path::PathBuf;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn empty_vars_use_defaults() {
    let config = AppConfig::from_vars(&HashMap::new()).unwrap();

    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
    assert_eq!(config.store, StoreConfig::Memory);
    assert_eq!(config.static_dir, PathBuf::from("."));
    assert_eq!(config.upload_path, PathBuf::from("uploaded_file"));
    assert_eq!(config.upload_limit_bytes, 10 << 20);
    assert_eq!(config.log_dir, None);
}

#[test]
fn sqlite_backend_reads_path_and_bound() {
    let config = AppConfig::from_vars(&vars(&[
        ("STORE_BACKEND", "sqlite"),
        ("DB_PATH", "/var/lib/clickform/users.db"),
        ("DB_FIELD_MAX_CHARS", "64"),
    ]))
    .unwrap();

    assert_eq!(
        config.store,
        StoreConfig::Sqlite(SqliteTarget {
            path: PathBuf::from("/var/lib/clickform/users.db"),
            field_max_chars: 64,
        })
    );
}

#[test]
fn sqlite_backend_without_path_is_missing() {
    let err = AppConfig::from_vars(&vars(&[("STORE_BACKEND", "sqlite")])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing("DB_PATH")));
}

#[test]
fn invalid_values_are_reported_with_key() {
    let err = AppConfig::from_vars(&vars(&[("BIND_ADDR", "not-an-addr")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "BIND_ADDR", .. }));

    let err = AppConfig::from_vars(&vars(&[("STORE_BACKEND", "mssql")])).unwrap_err();
    assert!(err.to_string().contains("mssql"));

    let err = AppConfig::from_vars(&vars(&[
        ("STORE_BACKEND", "sqlite"),
        ("DB_PATH", "x.db"),
        ("DB_FIELD_MAX_CHARS", "0"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "DB_FIELD_MAX_CHARS", .. }));
}

#[test]
fn env_file_values_feed_config() {
    let dir = tempfile::tempdir().unwrap();
    let env_path = dir.path().join(".env");
    std::fs::write(
        &env_path,
        "# local settings\nSTATIC_DIR = public\nUPLOAD_LIMIT_BYTES=2048\n",
    )
    .unwrap();

    let parsed = parse_env_file(&std::fs::read_to_string(&env_path).unwrap());
    let config = AppConfig::from_vars(&parsed).unwrap();

    assert_eq!(config.static_dir, PathBuf::from("public"));
    assert_eq!(config.upload_limit_bytes, 2048);
}

#[test]
fn missing_env_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(AppConfig::load(dir.path().join("absent.env")).is_ok());
}

#[test]
fn unreadable_env_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = AppConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
