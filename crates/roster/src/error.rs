//! Error types for roster.
//!
//! Every failure the library can hit is an [`Error`]. Storage failures are
//! always returned to the caller; nothing in the crate swallows them.

use std::path::PathBuf;
use thiserror::Error;

use crate::form::Field;

/// The main error type for roster operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// One or more required form fields were empty.
    #[error("Please put data in all fields (missing: {})", Field::join(.missing))]
    Validation {
        /// The fields that had no value.
        missing: Vec<Field>,
    },

    /// The course is not in the configured catalog.
    #[error("unknown course '{course}'")]
    UnknownCourse {
        /// The rejected course value.
        course: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The value stored under the record key is not a JSON array of records.
    #[error("stored value under '{key}' is not a valid record list: {source}")]
    CorruptSlot {
        /// The storage key that holds the bad value.
        key: String,
        /// The decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The key-value backend failed for a reason of its own.
    #[error("storage backend error: {0}")]
    Backend(String),

    // === Lookup Errors ===
    /// No record exists at the requested position.
    #[error("no record at position {index} (store holds {len})")]
    RecordNotFound {
        /// The requested 0-based position.
        index: usize,
        /// Number of records in the store.
        len: usize,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for roster operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new backend error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Check if this error came from user input rather than the system.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::UnknownCourse { .. })
    }

    /// Check if this error means persisted state could not be read or written.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::CorruptSlot { .. }
                | Self::Backend(_)
                | Self::DirectoryCreate { .. }
                | Self::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = Error::Validation {
            missing: vec![Field::FirstName, Field::Password],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Please put data in all fields"));
        assert!(msg.contains("first name"));
        assert!(msg.contains("password"));
    }

    #[test]
    fn test_unknown_course_display() {
        let err = Error::UnknownCourse {
            course: "BSXX".to_string(),
        };
        assert_eq!(err.to_string(), "unknown course 'BSXX'");
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::Validation { missing: vec![] }.is_validation());
        assert!(Error::UnknownCourse {
            course: String::new()
        }
        .is_validation());
        assert!(!Error::backend("down").is_validation());
    }

    #[test]
    fn test_is_storage() {
        assert!(Error::backend("disk full").is_storage());
        assert!(!Error::ConfigValidation {
            message: "bad".to_string()
        }
        .is_storage());
        assert!(!Error::RecordNotFound { index: 3, len: 1 }.is_storage());
        assert!(!Error::Validation { missing: vec![] }.is_storage());
    }

    #[test]
    fn test_record_not_found_display() {
        let err = Error::RecordNotFound { index: 4, len: 2 };
        let msg = err.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_corrupt_slot_display() {
        let source = serde_json::from_str::<Vec<i32>>("{").unwrap_err();
        let err = Error::CorruptSlot {
            key: "studentData".to_string(),
            source,
        };
        assert!(err.to_string().contains("studentData"));
        assert!(err.is_storage());
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "store_key must not be empty".to_string(),
        };
        assert!(err.to_string().contains("store_key"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
