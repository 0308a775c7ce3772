//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the interview domain.

mod errors;
mod ids;
mod interview_status;
mod score;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{InterviewId, QuestionId};
pub use interview_status::InterviewStatus;
pub use score::Score;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
