//! Error type shared by the interview command and query handlers.

use crate::domain::foundation::{ErrorCode, InterviewId};
use crate::domain::interview::InterviewError;
use crate::ports::StoreError;

/// Failure of an interview handler.
#[derive(Debug, Clone, PartialEq)]
pub enum InterviewCommandError {
    /// No live session has this id
    NotFound(InterviewId),
    /// A session with this id is already registered
    AlreadyExists(InterviewId),
    /// State-machine or validation error
    Interview(InterviewError),
    /// The task running the operation panicked or was aborted
    Internal(String),
}

impl InterviewCommandError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InterviewCommandError::NotFound(_) => ErrorCode::InterviewNotFound,
            InterviewCommandError::AlreadyExists(_) => ErrorCode::AlreadyExists,
            InterviewCommandError::Interview(err) => err.code(),
            InterviewCommandError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl std::fmt::Display for InterviewCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterviewCommandError::NotFound(id) => write!(f, "Interview not found: {}", id),
            InterviewCommandError::AlreadyExists(id) => {
                write!(f, "Interview already exists: {}", id)
            }
            InterviewCommandError::Interview(err) => write!(f, "{}", err),
            InterviewCommandError::Internal(msg) => write!(f, "Interview operation failed: {}", msg),
        }
    }
}

impl std::error::Error for InterviewCommandError {}

impl From<InterviewError> for InterviewCommandError {
    fn from(err: InterviewError) -> Self {
        InterviewCommandError::Interview(err)
    }
}

impl From<StoreError> for InterviewCommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => InterviewCommandError::NotFound(id),
            StoreError::AlreadyExists(id) => InterviewCommandError::AlreadyExists(id),
        }
    }
}

impl From<tokio::task::JoinError> for InterviewCommandError {
    fn from(err: tokio::task::JoinError) -> Self {
        InterviewCommandError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::InterviewStatus;

    #[test]
    fn store_errors_convert() {
        let id = InterviewId::new();
        let err: InterviewCommandError = StoreError::NotFound(id).into();
        assert_eq!(err, InterviewCommandError::NotFound(id));
        assert_eq!(err.code(), ErrorCode::InterviewNotFound);
    }

    #[test]
    fn interview_errors_keep_their_code() {
        let err: InterviewCommandError =
            InterviewError::invalid_transition(InterviewStatus::Completed, "end the interview").into();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert_eq!(
            err.to_string(),
            "Cannot end the interview while interview is completed"
        );
    }
}
