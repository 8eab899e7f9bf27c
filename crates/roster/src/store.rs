//! The record store.
//!
//! All records live in one slot of a [`KeyValueStore`]: a JSON array under a
//! single key. Appending reads the whole array, pushes one record and writes
//! the whole array back. A missing slot reads as an empty array.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::Record;
use crate::storage::KeyValueStore;

/// Storage key the record array lives under unless configured otherwise.
pub const DEFAULT_STORE_KEY: &str = "studentData";

/// Ordered, append-only collection of [`Record`]s kept in one key-value slot.
///
/// Writes are read-modify-write and not atomic; with more than one writer the
/// last write wins.
#[derive(Debug)]
pub struct RecordStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Create a store using [`DEFAULT_STORE_KEY`].
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORE_KEY)
    }

    /// Create a store that keeps its records under `key`.
    #[must_use]
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The storage key holding the record array.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying key-value backend.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read every stored record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails or the stored value is not a
    /// JSON array of records.
    pub async fn read_all(&self) -> Result<Vec<Record>> {
        let raw = self.backend.get(&self.key).await.map_err(|e| {
            warn!("Failed to read records under {}: {}", self.key, e);
            e
        })?;

        let records = decode(&self.key, raw.as_deref()).map_err(|e| {
            warn!("{}", e);
            e
        })?;
        debug!("Loaded {} records from {}", records.len(), self.key);
        Ok(records)
    }

    /// Append `record` to the end of the stored sequence and return the
    /// sequence as written.
    ///
    /// Nothing is written if the current sequence cannot be read.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, encoding or writing the sequence fails.
    pub async fn append(&self, record: &Record) -> Result<Vec<Record>> {
        let mut records = self.read_all().await?;
        records.push(record.clone());

        let encoded = serde_json::to_string(&records)?;
        self.backend.set(&self.key, &encoded).await.map_err(|e| {
            warn!("Failed to write records under {}: {}", self.key, e);
            e
        })?;

        info!(
            "Stored record for {} ({} total)",
            record.username,
            records.len()
        );
        Ok(records)
    }

    /// Get the record at 0-based position `index`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored sequence cannot be read.
    pub async fn get(&self, index: usize) -> Result<Option<Record>> {
        let mut records = self.read_all().await?;
        if index < records.len() {
            Ok(Some(records.swap_remove(index)))
        } else {
            Ok(None)
        }
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored sequence cannot be read.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.read_all().await?.len())
    }
}

/// Decode a raw slot value. Missing, blank and `null` all mean "no records".
fn decode(key: &str, raw: Option<&str>) -> Result<Vec<Record>> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    serde_json::from_str::<Option<Vec<Record>>>(raw)
        .map(Option::unwrap_or_default)
        .map_err(|source| Error::CorruptSlot {
            key: key.to_string(),
            source,
        })
}
