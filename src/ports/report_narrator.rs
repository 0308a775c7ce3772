//! Report Narrator Port - prose summary for the final report.

use async_trait::async_trait;

use super::collaborator::CollaboratorError;
use crate::domain::foundation::InterviewId;
use crate::domain::interview::{CandidateProfile, CompletionReason, ReportStats};

/// Input for the narrative.
#[derive(Debug, Clone)]
pub struct NarrativeRequest {
    pub interview_id: InterviewId,
    pub candidate: CandidateProfile,
    pub job_description: String,
    pub stats: ReportStats,
    pub completion_reason: CompletionReason,
    /// Digests of the first few question/answer pairs.
    pub answer_highlights: Vec<String>,
}

/// Port for report narration.
#[async_trait]
pub trait ReportNarrator: Send + Sync {
    async fn generate_report_narrative(&self, request: &NarrativeRequest) -> Result<String, CollaboratorError>;
}
