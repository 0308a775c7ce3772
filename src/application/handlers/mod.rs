//! Application handlers.
//!
//! Command and query handlers that drive the interview engine against the
//! session store.

pub mod interview;

pub use interview::{
    EndInterviewCommand, EndInterviewHandler, GetInterviewHandler, GetInterviewQuery,
    GetReportHandler, GetReportQuery, InterviewCommandError, InterviewView,
    StartInterviewCommand, StartInterviewHandler, StartInterviewResult, SubmitAnswerCommand,
    SubmitAnswerHandler, SubmitAudioAnswerCommand, SubmitAudioAnswerHandler,
};
