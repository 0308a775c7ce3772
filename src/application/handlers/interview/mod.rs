//! Interview command and query handlers.

mod end_interview;
mod errors;
mod get_interview;
mod get_report;
mod start_interview;
mod submit_answer;
mod submit_audio_answer;

#[cfg(test)]
pub(crate) mod test_support;

pub use end_interview::{EndInterviewCommand, EndInterviewHandler};
pub use errors::InterviewCommandError;
pub use get_interview::{GetInterviewHandler, GetInterviewQuery, InterviewView};
pub use get_report::{GetReportHandler, GetReportQuery};
pub use start_interview::{StartInterviewCommand, StartInterviewHandler, StartInterviewResult};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler};
pub use submit_audio_answer::{SubmitAudioAnswerCommand, SubmitAudioAnswerHandler};
