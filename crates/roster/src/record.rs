//! Core record type for roster.
//!
//! A [`Record`] is one student's submitted form. Records carry no identifier;
//! their identity is their position in the stored sequence.

use serde::{Deserialize, Serialize};

/// Courses offered by the enrollment form when nothing else is configured.
///
/// The last entry is shown as "BS ELEC" in the picker but stored as
/// `BS ELEEC`; the stored value is what counts.
pub const DEFAULT_COURSES: &[&str] = &[
    "BSIT",
    "BSCS",
    "BSIT-FPSM",
    "BS CRIM",
    "BS ELEX",
    "BS ELEEC",
];

/// One student's form data.
///
/// Serialized with camelCase keys so the stored JSON array keeps the
/// `firstName`/`lastName` layout existing data already uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Course code, one of the form's catalog entries.
    pub course: String,
    /// Login name. Not unique.
    pub username: String,
    /// Login password, stored as entered.
    pub password: String,
}

impl Record {
    /// Create a new record from its five fields.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        course: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            course: course.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// First and last name joined by a space, as shown in the list view.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
