use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{field}' (expected fullName, email or major)")]
pub struct UnknownFieldError {
    pub field: String,
}

impl UnknownFieldError {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}
