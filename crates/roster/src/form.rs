//! The enrollment form.
//!
//! [`FormController`] holds the in-progress values of the five inputs and
//! turns them into a [`Record`] once every one of them has a value.

use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::storage::KeyValueStore;
use crate::store::RecordStore;

/// One input of the enrollment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Course picker.
    Course,
    /// Login name.
    Username,
    /// Login password.
    Password,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Course,
        Field::Username,
        Field::Password,
    ];

    /// Human-readable label, as shown on the input placeholder.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Course => "course",
            Self::Username => "username",
            Self::Password => "password",
        }
    }

    /// Join field labels with commas.
    #[must_use]
    pub fn join(fields: &[Field]) -> String {
        fields
            .iter()
            .map(|f| f.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input state for one record that has not been submitted yet.
///
/// Only presence is checked. A value made of spaces counts as filled in; an
/// empty course is the picker's "Select Course" placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    first_name: String,
    last_name: String,
    course: String,
    username: String,
    password: String,
}

impl FormController {
    /// Create a form with every field empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the value of one field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Current value of one field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Course => &self.course,
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    /// Fields that still have no value, in form order.
    #[must_use]
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&f| self.get(f).is_empty())
            .collect()
    }

    /// Check if every field is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        Field::ALL.into_iter().all(|f| self.get(f).is_empty())
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build a record from the current values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming every empty field.
    pub fn validate(&self) -> Result<Record> {
        let missing = self.missing();
        if !missing.is_empty() {
            debug!("Form rejected, missing: {}", Field::join(&missing));
            return Err(Error::Validation { missing });
        }

        Ok(Record::new(
            self.first_name.clone(),
            self.last_name.clone(),
            self.course.clone(),
            self.username.clone(),
            self.password.clone(),
        ))
    }

    /// Validate, append to `store`, then clear the form.
    ///
    /// Returns the submitted record together with the stored sequence as the
    /// append wrote it. The form keeps its values when validation or storage
    /// fails so the same input can be resubmitted.
    ///
    /// # Errors
    ///
    /// Returns a validation error without touching the store, or the store's
    /// error if the append fails.
    pub async fn submit<S: KeyValueStore>(
        &mut self,
        store: &RecordStore<S>,
    ) -> Result<(Record, Vec<Record>)> {
        let record = self.validate()?;
        let records = store.append(&record).await?;
        self.clear();
        Ok((record, records))
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Course => &mut self.course,
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }
}

impl From<&Record> for FormController {
    fn from(record: &Record) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            course: record.course.clone(),
            username: record.username.clone(),
            password: record.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;

    fn filled() -> FormController {
        FormController::new()
            .with(Field::FirstName, "Ana")
            .with(Field::LastName, "Cruz")
            .with(Field::Course, "BSIT")
            .with(Field::Username, "anac")
            .with(Field::Password, "pw1")
    }

    #[test]
    fn test_new_form_is_blank() {
        let form = FormController::new();
        assert!(form.is_blank());
        assert_eq!(form.missing(), Field::ALL.to_vec());
    }

    #[test]
    fn test_set_and_get() {
        let mut form = FormController::new();
        form.set(Field::Username, "anac");
        assert_eq!(form.get(Field::Username), "anac");
        assert_eq!(form.get(Field::Password), "");
    }

    #[test]
    fn test_validate_filled_form() {
        let record = filled().validate().unwrap();
        assert_eq!(record, Record::new("Ana", "Cruz", "BSIT", "anac", "pw1"));
    }

    #[test]
    fn test_validate_reports_each_missing_field() {
        for field in Field::ALL {
            let form = filled().with(field, "");
            match form.validate() {
                Err(Error::Validation { missing }) => assert_eq!(missing, vec![field]),
                other => panic!("expected validation error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        let form = filled().with(Field::LastName, " ");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_clear() {
        let mut form = filled();
        form.clear();
        assert!(form.is_blank());
    }

    #[test]
    fn test_from_record() {
        let record = Record::new("Bo", "Reyes", "BSCS", "bor", "pw2");
        let form = FormController::from(&record);
        assert_eq!(form.validate().unwrap(), record);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::FirstName.to_string(), "first name");
        assert_eq!(
            Field::join(&[Field::Course, Field::Password]),
            "course, password"
        );
    }

    #[tokio::test]
    async fn test_submit_stores_and_clears() {
        let store = RecordStore::new(MemoryKv::new());
        let mut form = filled();

        let (record, written) = form.submit(&store).await.unwrap();

        assert!(form.is_blank());
        assert_eq!(written, vec![record.clone()]);
        assert_eq!(store.read_all().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_submit_with_empty_field_leaves_store_unchanged() {
        let store = RecordStore::new(MemoryKv::new());
        filled().submit(&store).await.unwrap();

        for field in Field::ALL {
            let mut form = filled().with(field, "");
            let err = form.submit(&store).await.unwrap_err();
            assert!(err.is_validation());
            assert_eq!(form.get(Field::Username), if field == Field::Username { "" } else { "anac" });
            assert_eq!(store.count().await.unwrap(), 1);
        }
    }

    #[tokio::test]
    async fn test_submit_keeps_input_on_storage_failure() {
        let store = RecordStore::new(MemoryKv::with_entry("studentData", "corrupt"));
        let mut form = filled();

        let err = form.submit(&store).await.unwrap_err();
        assert!(err.is_storage());
        assert_eq!(form, filled());
    }
}
