//! `SQLite`-backed key-value storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info, warn};

use super::schema::{self, SELECT_UPDATED_AT, SELECT_VALUE, UPSERT_VALUE};
use super::KeyValueStore;
use crate::error::{Error, Result};

/// Path reported for in-memory databases.
const MEMORY_PATH: &str = ":memory:";

/// Key-value store persisted in a single `SQLite` file.
///
/// This is the device-local storage the application writes to by default.
/// Each key maps to one text value plus the time it was last written.
#[derive(Debug)]
pub struct SqliteKv {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteKv {
    /// Open or create a key-value database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        schema::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store, mostly useful for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(MEMORY_PATH),
            source,
        })?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(MEMORY_PATH),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the given key was last written, if it has ever been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn last_modified(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let raw: Option<String> = self
            .conn
            .query_row(SELECT_UPDATED_AT, [key], |row| row.get(0))
            .optional()?;

        Ok(raw.and_then(|s| match DateTime::parse_from_rfc3339(&s) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(e) => {
                warn!("Ignoring unparseable timestamp for key {}: {}", key, e);
                None
            }
        }))
    }

    /// Size of the database file in bytes, `0` for in-memory databases.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        if self.path.as_os_str() == MEMORY_PATH {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        }
    }
}

#[async_trait(?Send)]
impl KeyValueStore for SqliteKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(SELECT_VALUE, [key], |row| row.get(0))
            .optional()?;
        debug!("Read key {} (present: {})", key, value.is_some());
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(UPSERT_VALUE, (key, value, now))?;
        debug!("Wrote key {} ({} bytes)", key, value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_kv() -> SqliteKv {
        SqliteKv::open_in_memory().expect("failed to create test storage")
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let kv = create_test_kv();
        assert_eq!(kv.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let kv = create_test_kv();
        kv.set("studentData", "[]").await.unwrap();
        assert_eq!(kv.get("studentData").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let kv = create_test_kv();
        kv.set("k", "first").await.unwrap();
        kv.set("k", "second").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let kv = create_test_kv();
        kv.set("a", "1").await.unwrap();
        kv.set("b", "2").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(kv.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_unicode_value() {
        let kv = create_test_kv();
        kv.set("k", "Añá 日本語").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("Añá 日本語"));
    }

    #[tokio::test]
    async fn test_last_modified() {
        let kv = create_test_kv();
        assert!(kv.last_modified("k").unwrap().is_none());

        let before = Utc::now();
        kv.set("k", "v").await.unwrap();
        let modified = kv.last_modified("k").unwrap().unwrap();
        assert!(modified >= before - chrono::Duration::seconds(1));
    }

    #[test]
    fn test_in_memory_path_and_size() {
        let kv = create_test_kv();
        assert_eq!(kv.path(), Path::new(":memory:"));
        assert_eq!(kv.size_bytes(), 0);
    }

    #[tokio::test]
    async fn test_open_file_based_persists() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("roster.db");

        {
            let kv = SqliteKv::open(&db_path).unwrap();
            kv.set("k", "persisted").await.unwrap();
            assert_eq!(kv.path(), db_path);
        }

        let reopened = SqliteKv::open(&db_path).unwrap();
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested_path = dir.path().join("nested/deeper/roster.db");

        let kv = SqliteKv::open(&nested_path).unwrap();
        assert!(nested_path.exists());
        drop(kv);
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = SqliteKv::open(blocker.join("roster.db"));
        assert!(result.is_err());
        assert!(result.unwrap_err().is_storage());
    }
}
