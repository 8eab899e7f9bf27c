//! List and detail views.
//!
//! The list view is a table of every stored record; picking a row opens the
//! detail view for that record. Both views are tracked by independent
//! visibility flags that can be opened and closed any number of times.

use comfy_table::{presets, ContentArrangement, Table};

use crate::error::{Error, Result};
use crate::record::Record;

/// Column headers of the list table.
pub const LIST_HEADERS: [&str; 4] = ["No.", "Full Name", "Course", "Username"];

/// One row of the list table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// 1-based row number.
    pub number: usize,
    /// `first last`.
    pub full_name: String,
    /// Course code.
    pub course: String,
    /// Login name.
    pub username: String,
}

impl ListRow {
    /// Build the row shown for the record at 0-based `index`.
    #[must_use]
    pub fn new(index: usize, record: &Record) -> Self {
        Self {
            number: index + 1,
            full_name: record.full_name(),
            course: record.course.clone(),
            username: record.username.clone(),
        }
    }

    /// The row's cells, in header order.
    #[must_use]
    pub fn cells(&self) -> [String; 4] {
        [
            self.number.to_string(),
            self.full_name.clone(),
            self.course.clone(),
            self.username.clone(),
        ]
    }
}

/// Build list rows for `records` in stored order.
#[must_use]
pub fn list_rows(records: &[Record]) -> Vec<ListRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| ListRow::new(i, r))
        .collect()
}

/// Render `records` as a bordered table.
#[must_use]
pub fn render_table(records: &[Record]) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(LIST_HEADERS);

    for row in list_rows(records) {
        table.add_row(row.cells());
    }

    table.to_string()
}

/// Render `records` as tab-separated lines, one per record, without a header.
#[must_use]
pub fn render_plain(records: &[Record]) -> String {
    list_rows(records)
        .iter()
        .map(|row| row.cells().join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the detail view of one record.
///
/// The password is shown as stored.
#[must_use]
pub fn render_details(record: &Record) -> String {
    format!(
        "Student Details\nName: {}\nCourse: {}\nUsername: {}\nPassword: {}",
        record.full_name(),
        record.course,
        record.username,
        record.password
    )
}

/// Visibility and selection state of the list and detail views.
///
/// Records shown by the list are a transient copy, replaced on every read of
/// the store. Closing the list hides them without discarding them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    list_visible: bool,
    details_visible: bool,
    rows: Vec<Record>,
    selected: Option<Record>,
}

impl ViewState {
    /// Create a state with both views closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the list view is open.
    #[must_use]
    pub fn is_list_visible(&self) -> bool {
        self.list_visible
    }

    /// Check if the detail view is open.
    #[must_use]
    pub fn is_details_visible(&self) -> bool {
        self.details_visible
    }

    /// Records currently loaded into the view.
    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// The record shown by the detail view, if one was picked.
    #[must_use]
    pub fn selected(&self) -> Option<&Record> {
        self.selected.as_ref()
    }

    /// Replace the loaded records without changing visibility.
    pub fn set_rows(&mut self, rows: Vec<Record>) {
        self.rows = rows;
    }

    /// Open the list view showing `rows`.
    pub fn open_list(&mut self, rows: Vec<Record>) {
        self.rows = rows;
        self.list_visible = true;
    }

    /// Close the list view. The loaded rows stay until the next reload.
    pub fn close_list(&mut self) {
        self.list_visible = false;
    }

    /// Pick the row at 0-based `index` and open the detail view for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no row exists at `index`; the
    /// detail view stays as it was.
    pub fn select(&mut self, index: usize) -> Result<&Record> {
        let record = self.rows.get(index).cloned().ok_or(Error::RecordNotFound {
            index,
            len: self.rows.len(),
        })?;
        self.details_visible = true;
        Ok(&*self.selected.insert(record))
    }

    /// Close the detail view. The selection is kept until the next pick.
    pub fn close_details(&mut self) {
        self.details_visible = false;
    }

    /// Render the detail view, if it is open.
    #[must_use]
    pub fn render_details(&self) -> Option<String> {
        if self.details_visible {
            self.selected.as_ref().map(render_details)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new("Ana", "Cruz", "BSIT", "anac", "pw1"),
            Record::new("Bo", "Reyes", "BSCS", "bor", "pw2"),
        ]
    }

    #[test]
    fn test_list_rows_are_numbered_from_one() {
        let rows = list_rows(&records());
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[1].number, 2);
        assert_eq!(rows[1].full_name, "Bo Reyes");
        assert_eq!(rows[1].cells(), ["2", "Bo Reyes", "BSCS", "bor"].map(String::from));
    }

    #[test]
    fn test_render_table_contains_headers_and_rows() {
        let out = render_table(&records());
        for header in LIST_HEADERS {
            assert!(out.contains(header), "missing header {header}");
        }
        assert!(out.contains("Ana Cruz"));
        assert!(out.contains("bor"));
        assert!(!out.contains("pw1"));
    }

    #[test]
    fn test_render_table_empty() {
        let out = render_table(&[]);
        assert!(out.contains("Full Name"));
    }

    #[test]
    fn test_render_plain() {
        assert_eq!(
            render_plain(&records()),
            "1\tAna Cruz\tBSIT\tanac\n2\tBo Reyes\tBSCS\tbor"
        );
        assert_eq!(render_plain(&[]), "");
    }

    #[test]
    fn test_render_details() {
        let out = render_details(&records()[1]);
        assert!(out.contains("Name: Bo Reyes"));
        assert!(out.contains("Course: BSCS"));
        assert!(out.contains("Username: bor"));
        assert!(out.contains("Password: pw2"));
    }

    #[test]
    fn test_view_state_starts_closed() {
        let state = ViewState::new();
        assert!(!state.is_list_visible());
        assert!(!state.is_details_visible());
        assert!(state.selected().is_none());
        assert!(state.render_details().is_none());
    }

    #[test]
    fn test_select_opens_details() {
        let mut state = ViewState::new();
        state.open_list(records());

        let picked = state.select(1).unwrap().clone();
        assert_eq!(picked.username, "bor");
        assert!(state.is_details_visible());
        assert!(state.render_details().unwrap().contains("Password: pw2"));
    }

    #[test]
    fn test_select_out_of_range() {
        let mut state = ViewState::new();
        state.open_list(records());

        let err = state.select(2).unwrap_err();
        assert!(matches!(err, Error::RecordNotFound { index: 2, len: 2 }));
        assert!(!state.is_details_visible());
    }

    #[test]
    fn test_flags_are_independent_and_reopenable() {
        let mut state = ViewState::new();
        for _ in 0..3 {
            state.open_list(records());
            state.select(0).unwrap();
            state.close_details();
            assert!(state.is_list_visible());
            assert!(!state.is_details_visible());

            state.select(1).unwrap();
            state.close_list();
            assert!(!state.is_list_visible());
            assert!(state.is_details_visible());
            state.close_details();
        }
    }

    #[test]
    fn test_close_list_keeps_rows_until_reload() {
        let mut state = ViewState::new();
        state.open_list(records());
        state.close_list();
        assert_eq!(state.rows(), records().as_slice());

        state.open_list(Vec::new());
        assert!(state.rows().is_empty());
    }
}
