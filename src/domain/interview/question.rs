//! Questions asked during an interview.

use serde::{Deserialize, Serialize};

use super::phase::{Difficulty, InterviewPhase, QuestionType};
use crate::domain::foundation::{QuestionId, Timestamp};

/// Whether a piece of content came from a collaborator or a fixed fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationSource {
    Generated,
    Fallback,
}

impl GenerationSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, GenerationSource::Fallback)
    }
}

/// A question the session has asked.
///
/// Append-only: never mutated once pushed onto the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub phase: InterviewPhase,
    /// Position of the owning phase in the plan.
    pub phase_index: usize,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub expected_skills: Vec<String>,
    pub evaluation_criteria: Vec<String>,
    /// Set when this is a follow-up; points at the question it clarifies.
    pub follow_up_of: Option<QuestionId>,
    pub source: GenerationSource,
    pub asked_at: Timestamp,
}

impl Question {
    pub fn is_follow_up(&self) -> bool {
        self.follow_up_of.is_some()
    }

    pub fn is_primary(&self) -> bool {
        self.follow_up_of.is_none()
    }
}

/// Question content returned by the question generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub text: String,
    #[serde(default)]
    pub expected_skills: Vec<String>,
    #[serde(default)]
    pub evaluation_criteria: Vec<String>,
}

impl QuestionDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expected_skills: Vec::new(),
            evaluation_criteria: Vec::new(),
        }
    }

    pub fn with_expected_skills(mut self, skills: Vec<String>) -> Self {
        self.expected_skills = skills;
        self
    }

    pub fn with_evaluation_criteria(mut self, criteria: Vec<String>) -> Self {
        self.evaluation_criteria = criteria;
        self
    }
}
