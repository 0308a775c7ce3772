//! Interview engine - the state machine wired to its collaborators.

mod fallback;
mod interview_engine;
mod outcome;

pub use fallback::{
    default_evaluation, default_question, failed_narrative, DEFAULT_FEEDBACK, DEFAULT_FOLLOW_UP,
    DEFAULT_QUESTION,
};
pub use interview_engine::{Collaborators, EngineSettings, InterviewEngine};
pub use outcome::{AnswerSubmission, TurnAction, TurnOutcome};
