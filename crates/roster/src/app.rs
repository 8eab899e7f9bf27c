//! Screen-level state and event handlers.
//!
//! [`App`] wires the form, the record store and the view state together the
//! way the enrollment screen does: one handler per user action, each awaiting
//! at most one read and one write of the store before it returns.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::form::FormController;
use crate::record::Record;
use crate::storage::KeyValueStore;
use crate::store::RecordStore;
use crate::view::ViewState;

/// Something the user must be told after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// The user has to acknowledge this before continuing (bad input).
    Blocking(String),
    /// Shown without interrupting the user (storage trouble).
    Notice(String),
}

impl Alert {
    /// Classify an error for display.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        if err.is_validation() {
            Self::Blocking(err.to_string())
        } else {
            Self::Notice(err.to_string())
        }
    }

    /// The text to show.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Blocking(msg) | Self::Notice(msg) => msg,
        }
    }

    /// Check if the alert must be acknowledged.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Blocking(_))
    }
}

/// The enrollment screen: form input, stored records and open views.
#[derive(Debug)]
pub struct App<S> {
    store: RecordStore<S>,
    form: FormController,
    view: ViewState,
}

impl<S: KeyValueStore> App<S> {
    /// Create a screen over `store` with an empty form and closed views.
    #[must_use]
    pub fn new(store: RecordStore<S>) -> Self {
        Self {
            store,
            form: FormController::new(),
            view: ViewState::new(),
        }
    }

    /// The record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    /// The form being filled in.
    #[must_use]
    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Mutable access to the form, for text-change events.
    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    /// The list/detail view state.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Load stored records into the view without opening it.
    ///
    /// Run once when the screen first appears.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored records cannot be read.
    pub async fn load(&mut self) -> Result<usize> {
        let records = self.store.read_all().await?;
        let count = records.len();
        self.view.set_rows(records);
        Ok(count)
    }

    /// Submit the form.
    ///
    /// On success the record is stored, the form is cleared, the loaded rows
    /// become the sequence just written and the list view closes.
    ///
    /// # Errors
    ///
    /// Returns a validation error (store untouched) or the storage error.
    pub async fn add_student(&mut self) -> Result<Record> {
        let (record, records) = self.form.submit(&self.store).await.map_err(|e| {
            if !e.is_validation() {
                warn!("Error storing student data: {}", e);
            }
            e
        })?;

        info!("Added student {} ({} stored)", record.username, records.len());
        self.view.set_rows(records);
        self.view.close_list();
        Ok(record)
    }

    /// Reload the stored records and open the list view.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored records cannot be read; the list stays closed.
    pub async fn view_students(&mut self) -> Result<&[Record]> {
        let records = self.store.read_all().await.map_err(|e| {
            warn!("Error getting student data: {}", e);
            e
        })?;
        self.view.open_list(records);
        Ok(self.view.rows())
    }

    /// Pick the row at 0-based `index` and open its detail view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the loaded rows have no such index.
    pub fn select_row(&mut self, index: usize) -> Result<&Record> {
        self.view.select(index)
    }

    /// Close the list view.
    pub fn close_list(&mut self) {
        self.view.close_list();
    }

    /// Close the detail view.
    pub fn close_details(&mut self) {
        self.view.close_details();
    }
}
