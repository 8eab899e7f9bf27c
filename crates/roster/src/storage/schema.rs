//! `SQLite` schema definitions for roster.
//!
//! The database is a plain key-value table; every value is an opaque string
//! owned by whoever wrote it.

use rusqlite::Connection;

use crate::error::Result;

/// SQL statement to create the key-value table.
pub const CREATE_KV_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to read one value.
pub const SELECT_VALUE: &str = "SELECT value FROM kv_store WHERE key = ?1";

/// SQL statement to read the last write time of one key.
pub const SELECT_UPDATED_AT: &str = "SELECT updated_at FROM kv_store WHERE key = ?1";

/// SQL statement to insert or overwrite one value.
pub const UPSERT_VALUE: &str = r"
INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_KV_TABLE];

/// Create all tables if they don't exist.
///
/// # Errors
///
/// Returns an error if any statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}
