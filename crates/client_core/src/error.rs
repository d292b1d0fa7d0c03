use shared::{domain::DraftField, error::UnknownFieldError};
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please fill out all fields before submitting.";

/// Which controller operation a failure belongs to. Selects the wording of the
/// persistent error shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Delete,
}

impl Operation {
    fn generic_message(self) -> &'static str {
        match self {
            Operation::Load => "Something went wrong while loading students",
            Operation::Create => "Unable to create student",
            Operation::Delete => "Unable to delete student",
        }
    }

    fn status_message(self, status: u16) -> String {
        match self {
            Operation::Load => format!("Unable to load students (status {status})"),
            Operation::Create => format!("Failed to create student (status {status})"),
            Operation::Delete => format!("Failed to delete student (status {status})"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Please fill out all fields before submitting.")]
    Validation { missing: Vec<DraftField> },
    #[error("request failed before a response arrived: {0}")]
    Transport(String),
    #[error("server responded with status {status}")]
    Server { status: u16, body: String },
    #[error("failed to decode response body: {0}")]
    Decode(String),
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DirectoryError::Decode(err.to_string())
        } else {
            DirectoryError::Transport(err.to_string())
        }
    }
}

impl DirectoryError {
    pub fn status(&self) -> Option<u16> {
        match self {
            DirectoryError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text for the persistent error slot. Server responses prefer the body,
    /// except for the initial load which always reports the status.
    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            DirectoryError::Validation { .. } => VALIDATION_MESSAGE.to_string(),
            DirectoryError::Server { status, body } => {
                if operation == Operation::Load || body.trim().is_empty() {
                    operation.status_message(*status)
                } else {
                    body.clone()
                }
            }
            DirectoryError::Transport(_)
            | DirectoryError::Decode(_)
            | DirectoryError::InvalidUrl(_) => operation.generic_message().to_string(),
            DirectoryError::UnknownField(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_body_wins_over_status_for_mutations() {
        let err = DirectoryError::Server {
            status: 500,
            body: "cannot delete".into(),
        };
        assert_eq!(err.user_message(Operation::Delete), "cannot delete");
        assert_eq!(err.user_message(Operation::Create), "cannot delete");
    }

    #[test]
    fn blank_body_falls_back_to_status() {
        let err = DirectoryError::Server {
            status: 409,
            body: "  ".into(),
        };
        assert_eq!(
            err.user_message(Operation::Create),
            "Failed to create student (status 409)"
        );
        assert_eq!(
            err.user_message(Operation::Delete),
            "Failed to delete student (status 409)"
        );
    }

    #[test]
    fn load_failure_always_names_status() {
        let err = DirectoryError::Server {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(
            err.user_message(Operation::Load),
            "Unable to load students (status 500)"
        );
    }

    #[test]
    fn transport_failures_use_generic_messages() {
        let err = DirectoryError::Transport("connection refused".into());
        assert_eq!(
            err.user_message(Operation::Load),
            "Something went wrong while loading students"
        );
        assert_eq!(err.user_message(Operation::Create), "Unable to create student");
        assert_eq!(err.user_message(Operation::Delete), "Unable to delete student");
        assert_eq!(err.status(), None);
    }
}
