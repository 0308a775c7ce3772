//! Question Generator Port - produces primary and follow-up questions.

use async_trait::async_trait;

use super::collaborator::CollaboratorError;
use crate::domain::foundation::InterviewId;
use crate::domain::interview::{CandidateProfile, Difficulty, InterviewPhase, QuestionDraft, QuestionType};

/// Input for a new primary question.
#[derive(Debug, Clone)]
pub struct QuestionRequest {
    pub interview_id: InterviewId,
    pub job_description: String,
    pub candidate: CandidateProfile,
    pub phase: InterviewPhase,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    /// Bounded transcript of prior questions and answers.
    pub history: String,
}

/// Input for a clarifying follow-up.
#[derive(Debug, Clone)]
pub struct FollowUpRequest {
    pub interview_id: InterviewId,
    pub original_question: String,
    pub answer_text: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Port for question generation.
///
/// Implementations may be slow; the engine bounds every call with a timeout
/// and substitutes a fixed question on failure.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate_question(&self, request: &QuestionRequest) -> Result<QuestionDraft, CollaboratorError>;

    /// Returns the follow-up question text.
    async fn generate_follow_up(&self, request: &FollowUpRequest) -> Result<String, CollaboratorError>;
}
