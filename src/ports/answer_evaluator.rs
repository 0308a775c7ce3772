//! Answer Evaluator Port - scores an answer along fixed dimensions.

use async_trait::async_trait;

use super::collaborator::CollaboratorError;
use crate::domain::foundation::InterviewId;
use crate::domain::interview::Evaluation;

/// Input for scoring one answer.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub interview_id: InterviewId,
    pub question_text: String,
    pub answer_text: String,
    pub expected_skills: Vec<String>,
    pub evaluation_criteria: Vec<String>,
}

/// Port for answer evaluation.
///
/// Dimension scores are expected on a 0-10 scale. Values outside it are
/// rejected by the score aggregator and the engine falls back to a neutral
/// evaluation.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    async fn evaluate_answer(&self, request: &EvaluationRequest) -> Result<Evaluation, CollaboratorError>;
}
