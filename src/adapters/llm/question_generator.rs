//! LLM-backed QuestionGenerator.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use super::{join_or_none, operations, parse_json_reply};
use crate::domain::interview::{CandidateProfile, QuestionDraft};
use crate::ports::{
    AIProvider, CollaboratorError, CompletionRequest, FollowUpRequest, MessageRole,
    QuestionGenerator, QuestionRequest, RequestMetadata,
};

const QUESTION_SYSTEM_PROMPT: &str = "You are a professional interviewer who writes precise interview questions \
tailored to the role and the candidate's background. Ask one question at a time.";

const FOLLOW_UP_SYSTEM_PROMPT: &str = "You are a perceptive interviewer who uses follow-up questions \
to probe the depth of a candidate's experience.";

#[derive(Debug, Deserialize)]
struct QuestionReply {
    question: String,
    #[serde(default)]
    expected_skills: Vec<String>,
    #[serde(default)]
    evaluation_criteria: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FollowUpReply {
    follow_up_question: String,
}

/// Generates questions by prompting an `AIProvider` for JSON.
pub struct LlmQuestionGenerator {
    ai_provider: Arc<dyn AIProvider>,
    temperature: f32,
}

impl LlmQuestionGenerator {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn candidate_block(candidate: &CandidateProfile) -> String {
        let mut lines = vec![
            format!("Name: {}", candidate.name),
            format!("Years of experience: {}", candidate.years_experience),
            format!("Skills: {}", candidate.skills_summary()),
            format!("Target position: {}", candidate.target_position),
        ];
        if let Some(company) = &candidate.current_company {
            lines.push(format!("Current company: {}", company));
        }
        if let Some(education) = &candidate.education {
            lines.push(format!("Education: {}", education));
        }
        lines.join("\n")
    }

    fn question_prompt(request: &QuestionRequest) -> String {
        let history = if request.history.trim().is_empty() {
            "(no questions asked yet)"
        } else {
            request.history.as_str()
        };

        format!(
            r#"Write one interview question using the information below.

Job description:
{}

Candidate:
{}

Interview phase: {}
Difficulty: {}
Question type: {}

Conversation so far:
{}

Requirements:
1. The question is specific and answerable.
2. It suits the candidate's experience level.
3. It assesses skills relevant to the role.
4. It does not repeat an earlier question.

Respond with JSON only:
{{
  "question": "the question text",
  "expected_skills": ["skill", "..."],
  "evaluation_criteria": ["criterion", "..."]
}}"#,
            request.job_description,
            Self::candidate_block(&request.candidate),
            request.phase,
            request.difficulty,
            request.question_type,
            history,
        )
    }

    fn follow_up_prompt(request: &FollowUpRequest) -> String {
        format!(
            r#"Write one follow-up question.

Original question: {}

Candidate answer: {}

Strengths: {}
Weaknesses: {}

Target gaps or vague points in the answer and ask for concrete examples.

Respond with JSON only:
{{
  "follow_up_question": "the follow-up question"
}}"#,
            request.original_question,
            request.answer_text,
            join_or_none(&request.strengths),
            join_or_none(&request.weaknesses),
        )
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate_question(&self, request: &QuestionRequest) -> Result<QuestionDraft, CollaboratorError> {
        let completion = CompletionRequest::new(RequestMetadata::new(
            request.interview_id,
            operations::QUESTION_GENERATION,
        ))
        .with_system_prompt(QUESTION_SYSTEM_PROMPT)
        .with_message(MessageRole::User, Self::question_prompt(request))
        .with_max_tokens(500)
        .with_temperature(self.temperature)
        .with_json_mode();

        let response = self.ai_provider.complete(completion).await?;
        let reply: QuestionReply = parse_json_reply(&response.content)?;

        Ok(QuestionDraft::new(reply.question)
            .with_expected_skills(reply.expected_skills)
            .with_evaluation_criteria(reply.evaluation_criteria))
    }

    async fn generate_follow_up(&self, request: &FollowUpRequest) -> Result<String, CollaboratorError> {
        let completion = CompletionRequest::new(RequestMetadata::new(
            request.interview_id,
            operations::FOLLOW_UP_GENERATION,
        ))
        .with_system_prompt(FOLLOW_UP_SYSTEM_PROMPT)
        .with_message(MessageRole::User, Self::follow_up_prompt(request))
        .with_max_tokens(300)
        .with_temperature(self.temperature)
        .with_json_mode();

        let response = self.ai_provider.complete(completion).await?;
        let reply: FollowUpReply = parse_json_reply(&response.content)?;
        Ok(reply.follow_up_question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::foundation::InterviewId;
    use crate::domain::interview::{Difficulty, InterviewPhase, QuestionType};

    fn question_request() -> QuestionRequest {
        QuestionRequest {
            interview_id: InterviewId::new(),
            job_description: "Backend engineer working on Rust services".to_string(),
            candidate: CandidateProfile::new("Ada", 5, ["rust", "postgres"], "Backend Engineer")
                .unwrap()
                .with_current_company("Acme"),
            phase: InterviewPhase::Technical,
            difficulty: Difficulty::Medium,
            question_type: QuestionType::Technical,
            history: "Q1: Tell me about yourself\nA1: I build APIs...".to_string(),
        }
    }

    fn follow_up_request() -> FollowUpRequest {
        FollowUpRequest {
            interview_id: InterviewId::new(),
            original_question: "How do you design an API?".to_string(),
            answer_text: "Carefully.".to_string(),
            strengths: vec![],
            weaknesses: vec!["No examples".to_string()],
        }
    }

    #[tokio::test]
    async fn parses_question_reply() {
        let provider = Arc::new(MockAIProvider::new().with_response(
            r#"{"question": "How does the borrow checker help?", "expected_skills": ["rust"], "evaluation_criteria": ["accuracy"]}"#,
        ));
        let generator = LlmQuestionGenerator::new(provider.clone());

        let draft = generator.generate_question(&question_request()).await.unwrap();

        assert_eq!(draft.text, "How does the borrow checker help?");
        assert_eq!(draft.expected_skills, vec!["rust".to_string()]);
        assert_eq!(draft.evaluation_criteria, vec!["accuracy".to_string()]);

        let calls = provider.get_calls();
        assert_eq!(calls[0].metadata.operation, operations::QUESTION_GENERATION);
        assert!(calls[0].json_mode);
        let prompt = &calls[0].messages[0].content;
        assert!(prompt.contains("Interview phase: technical"));
        assert!(prompt.contains("Current company: Acme"));
        assert!(prompt.contains("Q1: Tell me about yourself"));
    }

    #[tokio::test]
    async fn question_lists_are_optional() {
        let provider = Arc::new(MockAIProvider::new().with_response(r#"{"question": "Why Rust?"}"#));
        let generator = LlmQuestionGenerator::new(provider);

        let draft = generator.generate_question(&question_request()).await.unwrap();

        assert_eq!(draft.text, "Why Rust?");
        assert!(draft.expected_skills.is_empty());
    }

    #[tokio::test]
    async fn malformed_question_reply_is_invalid_response() {
        let provider = Arc::new(MockAIProvider::new().with_response("I would ask about Rust."));
        let generator = LlmQuestionGenerator::new(provider);

        let err = generator.generate_question(&question_request()).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn provider_failure_maps_to_collaborator_error() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        }));
        let generator = LlmQuestionGenerator::new(provider);

        let err = generator.generate_question(&question_request()).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Unavailable(_)));
    }

    #[tokio::test]
    async fn parses_follow_up_reply() {
        let provider = Arc::new(
            MockAIProvider::new().with_response(r#"{"follow_up_question": "Can you give an example?"}"#),
        );
        let generator = LlmQuestionGenerator::new(provider.clone());

        let text = generator.generate_follow_up(&follow_up_request()).await.unwrap();

        assert_eq!(text, "Can you give an example?");
        let prompt = &provider.get_calls()[0].messages[0].content;
        assert!(prompt.contains("Strengths: none"));
        assert!(prompt.contains("Weaknesses: No examples"));
    }
}
