//! LLM-backed ReportNarrator.

use async_trait::async_trait;
use std::sync::Arc;

use super::operations;
use crate::ports::{
    AIProvider, CollaboratorError, CompletionRequest, MessageRole, NarrativeRequest,
    ReportNarrator, RequestMetadata,
};

const NARRATIVE_SYSTEM_PROMPT: &str = r#"You are a senior hiring specialist writing an interview evaluation.

Cover:
1. Overall assessment and recommendation
2. Technical ability
3. Soft skills
4. Strengths and highlights
5. Areas to improve
6. Whether to proceed, and why"#;

/// Writes the report narrative by prompting an `AIProvider`.
pub struct LlmReportNarrator {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmReportNarrator {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    fn narrative_prompt(request: &NarrativeRequest) -> String {
        let stats = &request.stats;
        let phases = stats
            .phase_summaries
            .iter()
            .map(|p| {
                format!(
                    "- {} ({}): average {:.1}/10 over {} question(s), {} follow-up(s)",
                    p.phase, p.difficulty, p.average_score, p.primary_questions, p.follow_ups
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let highlights = if request.answer_highlights.is_empty() {
            "(no answers recorded)".to_string()
        } else {
            request.answer_highlights.join("\n\n")
        };

        format!(
            r#"Candidate: {} ({} years of experience, skills: {})
Target position: {}

Job description:
{}

Interview data:
Questions asked: {}
Questions answered: {}
Average answer score: {:.1}/10
Overall score: {:.1}/10
Computed recommendation: {}
Ended because: {}

Phase performance:
{}

Key answers:
{}

Write the evaluation report as plain prose."#,
            request.candidate.name,
            request.candidate.years_experience,
            request.candidate.skills_summary(),
            request.candidate.target_position,
            request.job_description,
            stats.questions_asked,
            stats.questions_answered,
            stats.average_answer_score,
            stats.overall_score,
            stats.recommendation,
            request.completion_reason,
            if phases.is_empty() { "(no phases completed)".to_string() } else { phases },
            highlights,
        )
    }
}

#[async_trait]
impl ReportNarrator for LlmReportNarrator {
    async fn generate_report_narrative(&self, request: &NarrativeRequest) -> Result<String, CollaboratorError> {
        let completion = CompletionRequest::new(RequestMetadata::new(
            request.interview_id,
            operations::REPORT_NARRATIVE,
        ))
        .with_system_prompt(NARRATIVE_SYSTEM_PROMPT)
        .with_message(MessageRole::User, Self::narrative_prompt(request))
        .with_max_tokens(1500)
        .with_temperature(0.5);

        let response = self.ai_provider.complete(completion).await?;
        Ok(response.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::foundation::InterviewId;
    use crate::domain::interview::{
        CandidateProfile, CompletionReason, RecommendationTier, ReportStats,
    };

    fn request() -> NarrativeRequest {
        NarrativeRequest {
            interview_id: InterviewId::new(),
            candidate: CandidateProfile::new("Ada", 5, ["rust"], "Backend Engineer").unwrap(),
            job_description: "Rust services".to_string(),
            stats: ReportStats {
                overall_score: 7.2,
                recommendation: RecommendationTier::from_score(7.2),
                average_answer_score: 7.0,
                questions_asked: 4,
                questions_answered: 4,
                follow_ups: 1,
                phases_completed: 2,
                total_phases: 6,
                duration_seconds: 600,
                phase_summaries: vec![],
            },
            completion_reason: CompletionReason::EndedByCaller,
            answer_highlights: vec!["Question 1: Why Rust?\nAnswer: Safety\nScore: 7.0".to_string()],
        }
    }

    #[tokio::test]
    async fn returns_trimmed_narrative() {
        let provider = Arc::new(MockAIProvider::new().with_response("  Solid candidate.\n"));
        let narrator = LlmReportNarrator::new(provider.clone());

        let narrative = narrator.generate_report_narrative(&request()).await.unwrap();

        assert_eq!(narrative, "Solid candidate.");
        let call = &provider.get_calls()[0];
        assert_eq!(call.metadata.operation, operations::REPORT_NARRATIVE);
        assert!(!call.json_mode);
        let prompt = &call.messages[0].content;
        assert!(prompt.contains("Overall score: 7.2/10"));
        assert!(prompt.contains("Ended because: ended_by_caller"));
        assert!(prompt.contains("Question 1: Why Rust?"));
        assert!(prompt.contains("(no phases completed)"));
    }

    #[tokio::test]
    async fn provider_timeout_maps_to_timeout() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 60 }));
        let narrator = LlmReportNarrator::new(provider);

        let err = narrator.generate_report_narrative(&request()).await.unwrap_err();
        assert_eq!(err, CollaboratorError::Timeout { secs: 60 });
    }
}
