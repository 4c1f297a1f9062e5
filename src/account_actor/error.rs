use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors from address and bank account forms.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Record not found: {0}")]
    RecordNotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<AccountError>> for AccountError {
    fn from(err: FrameworkError<AccountError>) -> Self {
        match err {
            FrameworkError::Entity(e) => e,
            other => AccountError::ActorCommunicationError(other.to_string()),
        }
    }
}
