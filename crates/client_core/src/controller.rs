use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError, Weak,
    },
    time::Duration,
};

use shared::domain::{DraftField, StudentId};
use tracing::{debug, info, warn};

use crate::{
    api::StudentApi,
    confirm::Confirm,
    error::{DirectoryError, Operation},
    notification::{ExpiryTimer, NOTIFICATION_TTL},
    state::{Action, DirectoryState, Pending},
    view::DirectoryView,
};

/// What an operation ended up doing. The UI reads state, this is for callers
/// that want to branch or log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server confirmed the change and local state reflects it.
    Applied,
    /// Rejected locally before any request was sent.
    Rejected,
    /// The user declined the confirmation.
    Declined,
    /// Nothing to do: stale id, control disabled, or already ran.
    Skipped,
    /// The request failed; the persistent error slot holds the reason.
    Failed,
}

struct Shared {
    state: DirectoryState,
    expiry: ExpiryTimer,
    notification_ttl: Duration,
}

/// Handle to the lock-protected state. The lock is never held across an await.
#[derive(Clone)]
struct Store(Arc<Mutex<Shared>>);

impl Store {
    fn new(notification_ttl: Duration) -> Self {
        Self(Arc::new(Mutex::new(Shared {
            state: DirectoryState::default(),
            expiry: ExpiryTimer::default(),
            notification_ttl,
        })))
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, action: Action) {
        let mut shared = self.lock();
        self.apply_locked(&mut shared, action);
    }

    fn apply_locked(&self, shared: &mut Shared, action: Action) {
        let Some(seq) = shared.state.apply(action) else {
            return;
        };
        let weak = Arc::downgrade(&self.0);
        let ttl = shared.notification_ttl;
        shared.expiry.restart(ttl, expire_notification(weak, seq));
    }

    fn pending(&self, pending: Pending) -> InFlight {
        InFlight {
            store: self.clone(),
            pending: Some(pending),
        }
    }
}

async fn expire_notification(shared: Weak<Mutex<Shared>>, seq: u64) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let mut shared = shared.lock().unwrap_or_else(PoisonError::into_inner);
    shared.state.apply(Action::NotificationExpired { seq });
    debug!(seq, "notification expired");
}

/// Busy marker of one in-flight request. Settling applies the completion;
/// dropping without settling releases the marker.
struct InFlight {
    store: Store,
    pending: Option<Pending>,
}

impl InFlight {
    fn settle(mut self, action: Action) {
        self.pending = None;
        self.store.dispatch(action);
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            warn!(?pending, "operation dropped before it settled");
            self.store.dispatch(Action::Abandoned(pending));
        }
    }
}

/// Keeps the local student directory in sync with the remote collection.
///
/// Operations take `&self`, so a create and a delete can be awaited
/// concurrently. Their completions are applied one at a time, each as a
/// single reducer [`Action`].
pub struct DirectoryController<A, C> {
    api: A,
    confirm: C,
    store: Store,
    load_started: AtomicBool,
}

impl<A, C> DirectoryController<A, C>
where
    A: StudentApi,
    C: Confirm,
{
    pub fn new(api: A, confirm: C) -> Self {
        Self::with_notification_ttl(api, confirm, NOTIFICATION_TTL)
    }

    pub fn with_notification_ttl(api: A, confirm: C, notification_ttl: Duration) -> Self {
        Self {
            api,
            confirm,
            store: Store::new(notification_ttl),
            load_started: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn snapshot(&self) -> DirectoryState {
        self.store.lock().state.clone()
    }

    pub fn view(&self) -> DirectoryView {
        DirectoryView::from_state(&self.store.lock().state)
    }

    /// Fetches the full collection. Runs once per controller; later calls are
    /// no-ops and nothing is retried.
    pub async fn load_collection(&self) -> Outcome {
        if self.load_started.swap(true, Ordering::SeqCst) {
            debug!("student collection already requested");
            return Outcome::Skipped;
        }

        let in_flight = self.store.pending(Pending::Load);
        match self.api.list_students().await {
            Ok(students) => {
                info!(count = students.len(), "loaded student collection");
                in_flight.settle(Action::LoadSucceeded(students));
                Outcome::Applied
            }
            Err(err) => {
                warn!(error = %err, "failed to load student collection");
                in_flight.settle(Action::LoadFailed(err.user_message(Operation::Load)));
                Outcome::Failed
            }
        }
    }

    /// Edits one draft field by its form name. Ignored while a create is in
    /// flight, since the form is disabled then.
    pub fn update_field(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<Outcome, DirectoryError> {
        let field: DraftField = name.parse()?;
        Ok(self.set_field(field, value))
    }

    pub fn set_field(&self, field: DraftField, value: impl Into<String>) -> Outcome {
        let mut shared = self.store.lock();
        if shared.state.submitting {
            debug!(%field, "draft is locked while a create is in flight");
            return Outcome::Skipped;
        }
        self.store.apply_locked(
            &mut shared,
            Action::FieldChanged {
                field,
                value: value.into(),
            },
        );
        Outcome::Applied
    }

    /// Submits the current draft as a new student.
    pub async fn submit(&self) -> Outcome {
        let request = {
            let mut shared = self.store.lock();
            if shared.state.submitting {
                debug!("create already in flight");
                return Outcome::Skipped;
            }

            let missing = shared.state.draft.missing_fields();
            if !missing.is_empty() {
                let err = DirectoryError::Validation { missing };
                debug!(error = %err, "draft rejected before submission");
                self.store.apply_locked(&mut shared, Action::SubmitRejected);
                return Outcome::Rejected;
            }

            self.store.apply_locked(&mut shared, Action::SubmitStarted);
            shared.state.draft.to_request()
        };

        let in_flight = self.store.pending(Pending::Submit);
        match self.api.create_student(&request).await {
            Ok(created) => {
                info!(id = %created.id, "student created");
                in_flight.settle(Action::SubmitSucceeded(created));
                Outcome::Applied
            }
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "failed to create student");
                in_flight.settle(Action::SubmitFailed(err.user_message(Operation::Create)));
                Outcome::Failed
            }
        }
    }

    /// Deletes a student after the user confirms. The record stays until the
    /// server confirms the delete.
    pub async fn remove(&self, id: StudentId) -> Outcome {
        let student = {
            let shared = self.store.lock();
            if shared.state.deleting_id == Some(id) {
                debug!(%id, "delete already in flight for this student");
                return Outcome::Skipped;
            }
            shared.state.student(id).cloned()
        };
        let Some(student) = student else {
            debug!(%id, "ignoring delete for a student that is no longer listed");
            return Outcome::Skipped;
        };

        let prompt = format!("Remove {}?", student.full_name);
        if !self.confirm.confirm(&prompt).await {
            debug!(%id, "delete declined");
            return Outcome::Declined;
        }

        self.store.dispatch(Action::DeleteStarted(id));
        let in_flight = self.store.pending(Pending::Delete(id));
        match self.api.delete_student(id).await {
            Ok(()) => {
                info!(%id, "student deleted");
                in_flight.settle(Action::DeleteSucceeded {
                    id,
                    full_name: student.full_name,
                });
                Outcome::Applied
            }
            Err(err) => {
                warn!(%id, error = %err, status = ?err.status(), "failed to delete student");
                in_flight.settle(Action::DeleteFailed(err.user_message(Operation::Delete)));
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
