//! Interview-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, InterviewStatus, ValidationError};

/// Errors surfaced synchronously by the interview state machine.
///
/// Collaborator failures are deliberately absent: those are recovered with
/// fallbacks and never reach the caller (see `ports::CollaboratorError`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterviewError {
    #[error("Cannot {operation} while interview is {from}")]
    InvalidStateTransition {
        from: InterviewStatus,
        operation: &'static str,
    },

    #[error("No question is awaiting an answer")]
    NoActiveQuestion,

    #[error("Score for '{dimension}' must be within [0, 10], got {value}")]
    InvalidScoreRange { dimension: String, value: f64 },

    #[error("Evaluation returned no dimension scores")]
    EmptyScoreSet,

    #[error("Phase index {index} out of range for plan of {len} phases")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid phase plan: {0}")]
    InvalidPhasePlan(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl InterviewError {
    pub fn invalid_transition(from: InterviewStatus, operation: &'static str) -> Self {
        InterviewError::InvalidStateTransition { from, operation }
    }

    pub fn invalid_score(dimension: impl Into<String>, value: f64) -> Self {
        InterviewError::InvalidScoreRange {
            dimension: dimension.into(),
            value,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            InterviewError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            InterviewError::NoActiveQuestion => ErrorCode::NoActiveQuestion,
            InterviewError::InvalidScoreRange { .. } | InterviewError::EmptyScoreSet => {
                ErrorCode::InvalidScoreRange
            }
            InterviewError::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            InterviewError::InvalidPhasePlan(_) | InterviewError::Validation(_) => {
                ErrorCode::ValidationFailed
            }
        }
    }
}

impl From<InterviewError> for DomainError {
    fn from(err: InterviewError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
