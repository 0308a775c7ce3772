//! LLM-backed AnswerEvaluator.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use super::{join_or_none, operations, parse_json_reply};
use crate::domain::interview::{DimensionScores, Evaluation};
use crate::ports::{
    AIProvider, AnswerEvaluator, CollaboratorError, CompletionRequest, EvaluationRequest,
    MessageRole, RequestMetadata,
};

const EVALUATION_SYSTEM_PROMPT: &str = r#"You are an expert interview assessor. Score strictly against the rubric.

Dimensions, each 0-10:
1. relevance: does the answer address the question directly
2. completeness: does it cover the key points
3. depth: technical and analytical depth
4. clarity: is it clear and well organised
5. specificity: does it give concrete examples and details"#;

#[derive(Debug, Deserialize)]
struct EvaluationReply {
    scores: DimensionScores,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    detailed_feedback: String,
    #[serde(default)]
    follow_up_suggestions: Vec<String>,
}

impl From<EvaluationReply> for Evaluation {
    fn from(reply: EvaluationReply) -> Self {
        Evaluation {
            dimension_scores: reply.scores,
            strengths: reply.strengths,
            weaknesses: reply.weaknesses,
            feedback: reply.detailed_feedback,
            follow_up_suggestions: reply.follow_up_suggestions,
        }
    }
}

/// Scores answers by prompting an `AIProvider` with a fixed rubric.
pub struct LlmAnswerEvaluator {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmAnswerEvaluator {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    fn evaluation_prompt(request: &EvaluationRequest) -> String {
        let answer = if request.answer_text.trim().is_empty() {
            "(no answer given)"
        } else {
            request.answer_text.as_str()
        };

        format!(
            r#"Evaluate this interview answer.

Question: {}

Answer: {}

Skills the question targets: {}
Evaluation criteria: {}

Respond with JSON only:
{{
  "scores": {{
    "relevance": 0,
    "completeness": 0,
    "depth": 0,
    "clarity": 0,
    "specificity": 0
  }},
  "strengths": ["..."],
  "weaknesses": ["..."],
  "detailed_feedback": "feedback and suggestions",
  "follow_up_suggestions": ["..."]
}}"#,
            request.question_text,
            answer,
            join_or_none(&request.expected_skills),
            join_or_none(&request.evaluation_criteria),
        )
    }
}

#[async_trait]
impl AnswerEvaluator for LlmAnswerEvaluator {
    async fn evaluate_answer(&self, request: &EvaluationRequest) -> Result<Evaluation, CollaboratorError> {
        let completion = CompletionRequest::new(RequestMetadata::new(
            request.interview_id,
            operations::ANSWER_EVALUATION,
        ))
        .with_system_prompt(EVALUATION_SYSTEM_PROMPT)
        .with_message(MessageRole::User, Self::evaluation_prompt(request))
        .with_max_tokens(600)
        .with_temperature(0.3)
        .with_json_mode();

        let response = self.ai_provider.complete(completion).await?;
        let reply: EvaluationReply = parse_json_reply(&response.content)?;
        Ok(reply.into())
    }
}
