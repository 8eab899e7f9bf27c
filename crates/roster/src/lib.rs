//! `roster` - Student records kept in local key-value storage
//!
//! Records are collected through a five-field form, appended to a single JSON
//! array stored under one key, and read back for a list view and a per-record
//! detail view.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod record;
pub mod storage;
pub mod store;
pub mod view;

pub use app::{Alert, App};
pub use config::Config;
pub use error::{Error, Result};
pub use form::{Field, FormController};
pub use logging::init_logging;
pub use record::Record;
pub use storage::{KeyValueStore, MemoryKv, SqliteKv};
pub use store::RecordStore;
pub use view::ViewState;
