//! Request and response bodies for the interview endpoints.

use serde::{Deserialize, Serialize};

use crate::application::engine::{TurnAction, TurnOutcome};
use crate::application::handlers::{InterviewView, StartInterviewResult};
use crate::domain::foundation::{InterviewStatus, QuestionId, Timestamp};
use crate::domain::interview::{
    CandidateProfile, CompletionReason, Difficulty, InterviewPhase, InterviewReport, PhaseSpec,
    Question, QuestionType, VoiceFeatures,
};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /interviews`.
#[derive(Debug, Clone, Deserialize)]
pub struct StartInterviewRequest {
    pub job_description: String,
    pub candidate: CandidateProfile,
    /// Replaces the configured phase plan for this interview.
    #[serde(default)]
    pub phase_plan: Option<Vec<PhaseSpec>>,
}

/// Body of `POST /interviews/:id/answers`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
    #[serde(default)]
    pub voice: Option<VoiceFeatures>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: QuestionId,
    pub text: String,
    pub phase: InterviewPhase,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub is_follow_up: bool,
    /// Ordinal within the interview, starting at 1.
    pub question_number: usize,
    pub expected_skills: Vec<String>,
}

impl QuestionResponse {
    pub fn from_question(question: &Question, question_number: usize) -> Self {
        Self {
            id: question.id,
            text: question.text.clone(),
            phase: question.phase,
            difficulty: question.difficulty,
            question_type: question.question_type,
            is_follow_up: question.is_follow_up(),
            question_number,
            expected_skills: question.expected_skills.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartInterviewResponse {
    pub interview_id: String,
    pub status: InterviewStatus,
    pub question: QuestionResponse,
    pub total_phases: usize,
}

impl From<StartInterviewResult> for StartInterviewResponse {
    fn from(result: StartInterviewResult) -> Self {
        Self {
            interview_id: result.interview_id.to_string(),
            status: InterviewStatus::InProgress,
            question: QuestionResponse::from_question(&result.first_question, 1),
            total_phases: result.total_phases,
        }
    }
}

/// Response to an answer: the action taken plus what to show next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub action: TurnAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<QuestionResponse>,
    /// Completed phases over total, e.g. "2/6".
    pub phase_progress: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<InterviewReport>,
}

impl From<TurnOutcome> for TurnResponse {
    fn from(outcome: TurnOutcome) -> Self {
        let next_question = outcome
            .next_question
            .as_ref()
            .map(|q| QuestionResponse::from_question(q, outcome.question_number));
        let (previous_score, feedback, strengths, weaknesses) = match outcome.answer {
            Some(answer) => (
                Some(answer.weighted_score.value()),
                Some(answer.feedback),
                answer.strengths,
                answer.weaknesses,
            ),
            None => (None, None, Vec::new(), Vec::new()),
        };

        Self {
            action: outcome.action,
            previous_score,
            feedback,
            strengths,
            weaknesses,
            next_question,
            phase_progress: format!("{}/{}", outcome.phases_completed, outcome.total_phases),
            report: outcome.report,
        }
    }
}

/// Body of `GET /interviews/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewStateResponse {
    pub interview_id: String,
    pub candidate_name: String,
    pub status: InterviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<InterviewPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_difficulty: Option<Difficulty>,
    pub phase_progress: String,
    pub questions_asked: usize,
    pub answers_given: usize,
    pub average_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_question: Option<QuestionResponse>,
    pub fallback_count: usize,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub completion_reason: Option<CompletionReason>,
}

impl From<InterviewView> for InterviewStateResponse {
    fn from(view: InterviewView) -> Self {
        Self {
            interview_id: view.interview_id.to_string(),
            candidate_name: view.candidate_name,
            status: view.status,
            current_phase: view.current_phase.map(|p| p.phase),
            current_difficulty: view.current_phase.map(|p| p.difficulty),
            phase_progress: format!("{}/{}", view.phases_completed, view.total_phases),
            questions_asked: view.questions_asked,
            answers_given: view.answers_given,
            average_score: view.average_score,
            pending_question: view
                .pending_question
                .as_ref()
                .map(|q| QuestionResponse::from_question(q, view.questions_asked)),
            fallback_count: view.fallback_count,
            started_at: view.started_at,
            completed_at: view.completed_at,
            completion_reason: view.completion_reason,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub live_sessions: usize,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}
