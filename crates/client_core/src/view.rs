//! Render model of the directory page, derived from [`DirectoryState`].

use std::fmt;

use shared::domain::{DraftField, StudentId};

use crate::state::DirectoryState;

pub const LOADING_TEXT: &str = "Loading students...";
pub const EMPTY_TEXT: &str = "No students yet. Add the first one with the form above.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Loading,
    Error(String),
    Empty,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Loading => f.write_str(LOADING_TEXT),
            StatusLine::Error(message) => f.write_str(message),
            StatusLine::Empty => f.write_str(EMPTY_TEXT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: DraftField,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub disabled: bool,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: StudentId,
    pub full_name: String,
    pub email: String,
    pub major: String,
    pub remove_label: &'static str,
    pub remove_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    pub notification: Option<String>,
    pub form: FormView,
    /// `"{n} total"`, shown once loaded without an error.
    pub badge: Option<String>,
    pub status: Option<StatusLine>,
    /// Only populated when there is something to list and no error to show.
    pub rows: Vec<RowView>,
}

impl DirectoryView {
    pub fn from_state(state: &DirectoryState) -> Self {
        let form = FormView {
            fields: DraftField::ALL
                .into_iter()
                .map(|field| FieldView {
                    field,
                    label: field.label(),
                    value: state.draft.get(field).to_string(),
                })
                .collect(),
            disabled: state.submitting,
            submit_label: if state.submitting {
                "Saving..."
            } else {
                "Add student"
            },
        };

        let listing = !state.loading && state.error.is_none();
        let status = if state.loading {
            Some(StatusLine::Loading)
        } else if let Some(error) = &state.error {
            Some(StatusLine::Error(error.clone()))
        } else if state.students.is_empty() {
            Some(StatusLine::Empty)
        } else {
            None
        };

        let rows = if listing {
            state
                .students
                .iter()
                .map(|student| {
                    let deleting = state.deleting_id == Some(student.id);
                    RowView {
                        id: student.id,
                        full_name: student.full_name.clone(),
                        email: student.email.clone(),
                        major: student.major.clone(),
                        remove_label: if deleting { "Removing..." } else { "Remove" },
                        remove_disabled: deleting,
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            notification: state.notification_message().map(str::to_string),
            form,
            badge: listing.then(|| format!("{} total", state.students.len())),
            status,
            rows,
        }
    }
}
