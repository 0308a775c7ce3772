//! Fixed content substituted when a collaborator fails.

use crate::domain::interview::{CompletionReason, DimensionScores, Evaluation, QuestionDraft};

pub const DEFAULT_QUESTION: &str =
    "Tell me about a recent project you worked on that was challenging. What was your role, and how did it turn out?";

pub const DEFAULT_FOLLOW_UP: &str =
    "Could you go into more detail about how you implemented that?";

pub const DEFAULT_FEEDBACK: &str =
    "A detailed evaluation was not available for this answer. Keep answers specific and structured.";

/// Generic primary question usable in any phase.
pub fn default_question() -> QuestionDraft {
    QuestionDraft::new(DEFAULT_QUESTION)
        .with_expected_skills(vec![
            "project management".to_string(),
            "technical implementation".to_string(),
            "problem solving".to_string(),
        ])
        .with_evaluation_criteria(vec![
            "project complexity".to_string(),
            "personal contribution".to_string(),
            "outcome and impact".to_string(),
        ])
}

/// Neutral evaluation: every dimension at 5.0.
pub fn default_evaluation() -> Evaluation {
    Evaluation {
        dimension_scores: DimensionScores::neutral(),
        strengths: vec!["Answer is broadly relevant".to_string()],
        weaknesses: vec!["Needs more concrete detail".to_string()],
        feedback: DEFAULT_FEEDBACK.to_string(),
        follow_up_suggestions: vec!["Ask for a concrete example".to_string()],
    }
}

/// Narrative used when the report narrator fails.
pub fn failed_narrative(reason: &str, completion: CompletionReason) -> String {
    format!(
        "Report generation failed: {}. The interview ended with reason '{}'; the structured scores above are complete.",
        reason, completion
    )
}
