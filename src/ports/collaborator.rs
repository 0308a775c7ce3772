//! Collaborator errors shared by the generation, evaluation, transcription
//! and narration ports.
//!
//! These errors never reach the caller of the interview engine. The engine
//! swaps in a fixed fallback and records the degradation on the session.

use super::ai_provider::AIError;

pub use crate::domain::interview::CollaboratorKind;

/// Failure of an external collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("collaborator timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("invalid collaborator response: {0}")]
    InvalidResponse(String),

    #[error("request rejected: {0}")]
    Rejected(String),
}

impl CollaboratorError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

impl From<AIError> for CollaboratorError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::Timeout { timeout_secs } => CollaboratorError::Timeout {
                secs: u64::from(timeout_secs),
            },
            AIError::Parse(msg) => CollaboratorError::InvalidResponse(msg),
            AIError::AuthenticationFailed
            | AIError::InvalidRequest(_)
            | AIError::ContextTooLong { .. }
            | AIError::ContentFiltered { .. } => CollaboratorError::Rejected(err.to_string()),
            AIError::RateLimited { .. } | AIError::Unavailable { .. } | AIError::Network(_) => {
                CollaboratorError::Unavailable(err.to_string())
            }
        }
    }
}
