//! Configuration management for roster.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::HashSet;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::DEFAULT_COURSES;
use crate::store::DEFAULT_STORE_KEY;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "roster";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "roster.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "ROSTER_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROSTER_`, sections split by `__`)
/// 2. TOML config file at `~/.config/roster/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Form configuration.
    pub form: FormConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/roster/roster.db`
    pub database_path: Option<PathBuf>,
    /// Key the record array is stored under.
    pub store_key: String,
}

/// Form-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Courses offered by the course picker.
    pub courses: Vec<String>,
    /// Reject courses that are not in `courses`.
    pub restrict_courses: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Resolved to the data dir at runtime
            store_key: DEFAULT_STORE_KEY.to_string(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            courses: DEFAULT_COURSES.iter().map(ToString::to_string).collect(),
            restrict_courses: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.store_key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "store_key must not be empty".to_string(),
            });
        }

        if self.form.courses.is_empty() {
            return Err(Error::ConfigValidation {
                message: "courses must list at least one course".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for course in &self.form.courses {
            if course.is_empty() {
                return Err(Error::ConfigValidation {
                    message: "courses must not contain an empty entry".to_string(),
                });
            }
            if !seen.insert(course.as_str()) {
                return Err(Error::ConfigValidation {
                    message: format!("duplicate course: {course}"),
                });
            }
        }

        Ok(())
    }

    /// Check a course against the catalog.
    ///
    /// An empty course passes here; presence is the form's concern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCourse`] if courses are restricted and `course`
    /// is not in the catalog.
    pub fn check_course(&self, course: &str) -> Result<()> {
        if course.is_empty()
            || !self.form.restrict_courses
            || self.form.courses.iter().any(|c| c == course)
        {
            Ok(())
        } else {
            Err(Error::UnknownCourse {
                course: course.to_string(),
            })
        }
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
