//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::form::{Field, FormController};

/// Add command arguments: one field per form input.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Student's first name
    #[arg(long, default_value = "")]
    pub first_name: String,

    /// Student's last name
    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Course code (see `roster courses`)
    #[arg(long, default_value = "")]
    pub course: String,

    /// Login username
    #[arg(long, default_value = "")]
    pub username: String,

    /// Login password
    #[arg(long, default_value = "")]
    pub password: String,
}

impl AddCommand {
    /// Fill a form with the given arguments. Omitted arguments stay empty.
    #[must_use]
    pub fn to_form(&self) -> FormController {
        FormController::new()
            .with(Field::FirstName, self.first_name.as_str())
            .with(Field::LastName, self.last_name.as_str())
            .with(Field::Course, self.course.as_str())
            .with(Field::Username, self.username.as_str())
            .with(Field::Password, self.password.as_str())
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Row number as printed by `roster list` (starts at 1)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub number: u64,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated rows
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON array as stored
    Json,
}
