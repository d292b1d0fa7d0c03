//! Local view state of the directory and the reducer that evolves it.
//!
//! Every completion handler of the controller maps to exactly one [`Action`],
//! so each transition is applied atomically under the state lock.

use shared::domain::{sort_by_id, Draft, DraftField, Student, StudentId};

use crate::{error::VALIDATION_MESSAGE, notification::Notification};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryState {
    /// Sorted ascending by id, no duplicate ids.
    pub students: Vec<Student>,
    pub draft: Draft,
    pub loading: bool,
    pub submitting: bool,
    pub deleting_id: Option<StudentId>,
    pub error: Option<String>,
    pub notification: Option<Notification>,
    next_notification_seq: u64,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            students: Vec::new(),
            draft: Draft::default(),
            loading: true,
            submitting: false,
            deleting_id: None,
            error: None,
            notification: None,
            next_notification_seq: 0,
        }
    }
}

/// Operation whose busy marker must be released if it never settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Load,
    Submit,
    Delete(StudentId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadSucceeded(Vec<Student>),
    LoadFailed(String),
    FieldChanged { field: DraftField, value: String },
    SubmitRejected,
    SubmitStarted,
    SubmitSucceeded(Student),
    SubmitFailed(String),
    DeleteStarted(StudentId),
    DeleteSucceeded { id: StudentId, full_name: String },
    DeleteFailed(String),
    /// The operation's future was dropped before it settled.
    Abandoned(Pending),
    NotificationExpired { seq: u64 },
}

impl DirectoryState {
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    pub fn notification_message(&self) -> Option<&str> {
        self.notification
            .as_ref()
            .map(|notification| notification.message.as_str())
    }

    /// Applies one transition. Returns the sequence number of a notification the
    /// action raised, so the caller can schedule its expiry.
    pub fn apply(&mut self, action: Action) -> Option<u64> {
        match action {
            Action::LoadSucceeded(mut students) => {
                sort_by_id(&mut students);
                students.dedup_by_key(|student| student.id);
                self.students = students;
                self.error = None;
                self.loading = false;
                None
            }
            Action::LoadFailed(message) => {
                self.error = Some(message);
                self.loading = false;
                None
            }
            Action::FieldChanged { field, value } => {
                self.draft.set(field, value);
                None
            }
            Action::SubmitRejected => {
                self.error = None;
                Some(self.notify(VALIDATION_MESSAGE.to_string()))
            }
            Action::SubmitStarted => {
                self.submitting = true;
                None
            }
            Action::SubmitSucceeded(created) => {
                let message = format!("Added {}.", created.full_name);
                self.students.retain(|student| student.id != created.id);
                self.students.push(created);
                sort_by_id(&mut self.students);
                self.draft.clear();
                self.error = None;
                self.submitting = false;
                Some(self.notify(message))
            }
            Action::SubmitFailed(message) => {
                self.notification = None;
                self.error = Some(message);
                self.submitting = false;
                None
            }
            Action::DeleteStarted(id) => {
                self.deleting_id = Some(id);
                None
            }
            Action::DeleteSucceeded { id, full_name } => {
                self.students.retain(|student| student.id != id);
                self.error = None;
                self.deleting_id = None;
                Some(self.notify(format!("Removed {full_name}.")))
            }
            Action::DeleteFailed(message) => {
                self.notification = None;
                self.error = Some(message);
                self.deleting_id = None;
                None
            }
            Action::Abandoned(pending) => {
                match pending {
                    Pending::Load => self.loading = false,
                    Pending::Submit => self.submitting = false,
                    Pending::Delete(id) => {
                        if self.deleting_id == Some(id) {
                            self.deleting_id = None;
                        }
                    }
                }
                None
            }
            Action::NotificationExpired { seq } => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|notification| notification.seq == seq)
                {
                    self.notification = None;
                }
                None
            }
        }
    }

    fn notify(&mut self, message: String) -> u64 {
        self.next_notification_seq += 1;
        let seq = self.next_notification_seq;
        self.notification = Some(Notification { message, seq });
        seq
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
