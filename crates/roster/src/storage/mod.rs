//! Key-value storage layer for roster.
//!
//! The application persists everything through [`KeyValueStore`], a small
//! asynchronous `get`/`set` interface over string keys and string values.
//! Two backends ship with the crate:
//!
//! - [`SqliteKv`]: a `SQLite` file, the default on-device storage
//! - [`MemoryKv`]: a process-local map, used by tests and dry runs
//!
//! Both report every failure to the caller.

pub mod schema;
mod sqlite;

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

pub use sqlite::SqliteKv;

/// An asynchronous string key-value store.
///
/// Calls are issued one at a time from a single logical thread, so the
/// returned futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryKv {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let kv = Self::new();
        kv.entries.borrow_mut().insert(key.into(), value.into());
        kv
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if no key has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[async_trait(?Send)]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_get_missing() {
        let kv = MemoryKv::new();
        assert!(kv.is_empty());
        assert_eq!(kv.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_set_and_get() {
        let kv = MemoryKv::new();
        kv.set("k", "v").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(kv.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_with_entry() {
        let kv = MemoryKv::with_entry("studentData", "[]");
        assert_eq!(kv.get("studentData").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_memory_overwrite_keeps_one_key() {
        let kv = MemoryKv::new();
        kv.set("k", "a").await.unwrap();
        kv.set("k", "b").await.unwrap();
        assert_eq!(kv.len(), 1);
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_memory_debug() {
        let kv = MemoryKv::with_entry("k", "v");
        let debug_str = format!("{kv:?}");
        assert!(debug_str.contains("MemoryKv"));
    }
}
