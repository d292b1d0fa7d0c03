//! Client core of the student directory: keeps a local copy of the remote
//! student collection, the new-student draft, and the transient and persistent
//! messages shown around them.

pub mod api;
pub mod confirm;
pub mod controller;
pub mod error;
pub mod notification;
pub mod state;
pub mod view;

pub use api::{HttpStudentApi, StudentApi, UnavailableStudentApi};
pub use confirm::{AlwaysConfirm, Confirm, NeverConfirm};
pub use controller::{DirectoryController, Outcome};
pub use error::{DirectoryError, Operation, VALIDATION_MESSAGE};
pub use notification::{Notification, NOTIFICATION_TTL};
pub use state::{Action, DirectoryState, Pending};
pub use view::{DirectoryView, FieldView, FormView, RowView, StatusLine};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
