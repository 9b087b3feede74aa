use thiserror::Error;

use vetforum_auth::CredentialDecodeError;
use vetforum_core::DomainError;
use vetforum_forum::AnswerError;
use vetforum_registration::ValidationError;

use crate::gateway::RemoteCallFailure;

/// Everything a UI handler may need to show after calling a service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Input(#[from] DomainError),

    #[error("you must be logged in to answer")]
    NoSession,

    #[error("your session is invalid; please log in again ({0})")]
    Credential(CredentialDecodeError),

    #[error("answer cannot be empty")]
    EmptyAnswer,

    #[error("remote call failed: {0}")]
    Remote(#[from] RemoteCallFailure),
}

impl From<AnswerError> for ClientError {
    fn from(value: AnswerError) -> Self {
        match value {
            AnswerError::NoSession => ClientError::NoSession,
            AnswerError::Credential(e) => ClientError::Credential(e),
            AnswerError::EmptyBody => ClientError::EmptyAnswer,
        }
    }
}

impl ClientError {
    /// The user has to (re-)authenticate before retrying.
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::NoSession | ClientError::Credential(_))
    }
}
