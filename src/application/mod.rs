//! Application layer - Engine, Commands, Queries, and Handlers.
//!
//! The engine runs the interview state machine against its collaborators.
//! Handlers resolve sessions from the store, serialize access to each one,
//! and hand them to the engine.

pub mod engine;
pub mod handlers;

pub use engine::{
    AnswerSubmission, Collaborators, EngineSettings, InterviewEngine, TurnAction, TurnOutcome,
};
pub use handlers::{
    EndInterviewCommand, EndInterviewHandler, GetInterviewHandler, GetInterviewQuery,
    GetReportHandler, GetReportQuery, InterviewCommandError, InterviewView,
    StartInterviewCommand, StartInterviewHandler, StartInterviewResult, SubmitAnswerCommand,
    SubmitAnswerHandler, SubmitAudioAnswerCommand, SubmitAudioAnswerHandler,
};
