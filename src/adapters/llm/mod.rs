//! LLM-backed collaborators.
//!
//! Each adapter builds a prompt, sends it through an `AIProvider`, and parses
//! the reply. Question generation and evaluation ask for JSON; the narrator
//! takes plain prose.

mod answer_evaluator;
mod question_generator;
mod report_narrator;

pub use answer_evaluator::LlmAnswerEvaluator;
pub use question_generator::LlmQuestionGenerator;
pub use report_narrator::LlmReportNarrator;

use serde::de::DeserializeOwned;

use crate::ports::CollaboratorError;

/// Operation tags carried in `RequestMetadata`.
pub mod operations {
    pub const QUESTION_GENERATION: &str = "question_generation";
    pub const FOLLOW_UP_GENERATION: &str = "follow_up_generation";
    pub const ANSWER_EVALUATION: &str = "answer_evaluation";
    pub const REPORT_NARRATIVE: &str = "report_narrative";
}

/// Parses a JSON object out of a model reply.
///
/// Models often wrap JSON in markdown fences or add a sentence around it, so
/// this takes the span from the first `{` to the last `}`.
pub(crate) fn parse_json_reply<T: DeserializeOwned>(content: &str) -> Result<T, CollaboratorError> {
    let start = content.find('{');
    let end = content.rfind('}');
    let body = match (start, end) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => {
            return Err(CollaboratorError::invalid_response(
                "reply does not contain a JSON object",
            ))
        }
    };

    serde_json::from_str(body)
        .map_err(|e| CollaboratorError::invalid_response(format!("malformed JSON reply: {}", e)))
}

/// Renders a list as comma-separated text, or "none".
pub(crate) fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
