//! `users` table definition.
//!
//! # Invariants
//! - `id` is an `AUTOINCREMENT` key, so SQLite never reuses a deleted id.
//! - `field_max_chars` is baked into a `CHECK` clause at creation time; later
//!   changes to the configured bound do not alter an existing table.

use super::DbResult;
use rusqlite::Connection;

/// Default column bound, matching `NVARCHAR(100)` in the legacy schema.
pub const DEFAULT_FIELD_MAX_CHARS: u32 = 100;

/// Returns the conditional create statement for the `users` table.
pub fn create_users_table_sql(field_max_chars: u32) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) <= {field_max_chars}),
            email TEXT NOT NULL CHECK (length(email) <= {field_max_chars})
        );"
    )
}

/// Creates the `users` table unless it already exists.
pub fn create_users_table(conn: &Connection, field_max_chars: u32) -> DbResult<()> {
    conn.execute_batch(&create_users_table_sql(field_max_chars))?;
    Ok(())
}

/// Returns whether the `users` table is present.
pub fn users_table_exists(conn: &Connection) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'users'
        );",
        [],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
