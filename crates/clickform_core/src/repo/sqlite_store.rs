//! SQLite-backed record store.
//!
//! # Responsibility
//! - Persist records in the `users` table.
//! - Report connect, schema, write and read failures as distinct errors.
//!
//! # Invariants
//! - Identity is assigned by SQLite (`AUTOINCREMENT`), never in process.
//! - The store keeps no shared mutable state; every operation opens its own
//!   connection and relies on SQLite locking for concurrency.
//!
//! # See also
//! - `db::schema` for the table definition.

use super::record_store::{RecordStore, StoreError, StoreResult};
use crate::db::schema::create_users_table;
use crate::db::{open_db, DbError};
use crate::model::record::{Record, RecordId};
use log::{debug, error};
use rusqlite::{params, Connection, TransactionBehavior};
use std::path::PathBuf;
use std::time::Instant;

/// Connection descriptor for the relational store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteTarget {
    /// Database file; created on first connect.
    pub path: PathBuf,
    /// Maximum characters accepted in `name` and `email`.
    pub field_max_chars: u32,
}

/// Record store reached through a SQLite driver connection.
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    target: SqliteTarget,
}

impl SqliteRecordStore {
    pub fn new(target: SqliteTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &SqliteTarget {
        &self.target
    }

    fn connect(&self) -> StoreResult<Connection> {
        open_db(&self.target.path).map_err(StoreError::Unavailable)
    }
}

impl RecordStore for SqliteRecordStore {
    fn create_table_if_absent(&self) -> StoreResult<()> {
        let conn = self.connect()?;
        create_users_table(&conn, self.target.field_max_chars).map_err(StoreError::Schema)
    }

    fn insert(&self, name: &str, email: &str) -> StoreResult<Record> {
        let started_at = Instant::now();
        let mut conn = self.connect()?;

        match insert_record(&mut conn, name, email) {
            Ok(id) => {
                debug!(
                    "event=record_insert module=repo status=ok id={} duration_ms={}",
                    id,
                    started_at.elapsed().as_millis()
                );
                Ok(Record::new(id, name, email))
            }
            Err(err) => {
                error!(
                    "event=record_insert module=repo status=error duration_ms={} error_code=write_failure error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(StoreError::Write(err))
            }
        }
    }

    fn list(&self) -> StoreResult<Vec<Record>> {
        let conn = self.connect()?;
        query_records(&conn).map_err(StoreError::Read)
    }
}

/// Inserts inside an `IMMEDIATE` transaction so the write lock is taken
/// up front and waits in the busy handler instead of failing mid-statement.
fn insert_record(conn: &mut Connection, name: &str, email: &str) -> Result<RecordId, DbError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute(
        "INSERT INTO users (name, email) VALUES (?1, ?2);",
        params![name, email],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

fn query_records(conn: &Connection) -> Result<Vec<Record>, DbError> {
    let mut stmt = conn.prepare("SELECT id, name, email FROM users ORDER BY id ASC;")?;
    let rows = stmt.query_map([], |row| {
        Ok(Record {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}
