//! GetInterviewHandler - Query handler for a session summary.

use std::sync::Arc;

use super::InterviewCommandError;
use crate::domain::foundation::{InterviewId, InterviewStatus, Timestamp};
use crate::domain::interview::{CompletionReason, PhaseSpec, Question, SessionState};
use crate::ports::SessionStore;

/// Query for an interview's current state.
#[derive(Debug, Clone)]
pub struct GetInterviewQuery {
    pub interview_id: InterviewId,
}

/// Read-only snapshot of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewView {
    pub interview_id: InterviewId,
    pub candidate_name: String,
    pub status: InterviewStatus,
    pub current_phase_index: usize,
    /// `None` once the interview is complete.
    pub current_phase: Option<PhaseSpec>,
    pub phases_completed: usize,
    pub total_phases: usize,
    pub questions_asked: usize,
    pub answers_given: usize,
    pub average_score: f64,
    pub pending_question: Option<Question>,
    pub fallback_count: usize,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub completion_reason: Option<CompletionReason>,
}

impl From<&SessionState> for InterviewView {
    fn from(state: &SessionState) -> Self {
        let (phases_completed, total_phases) = state.phase_progress();
        let current_phase = if state.status().is_completed() {
            None
        } else {
            state.current_phase().ok().copied()
        };

        Self {
            interview_id: *state.id(),
            candidate_name: state.candidate().name.clone(),
            status: state.status(),
            current_phase_index: state.current_phase_index(),
            current_phase,
            phases_completed,
            total_phases,
            questions_asked: state.questions().len(),
            answers_given: state.answers().len(),
            average_score: state.average_answer_score(),
            pending_question: state.pending_question().cloned(),
            fallback_count: state.fallbacks().len(),
            started_at: state.started_at().copied(),
            completed_at: state.completed_at().copied(),
            completion_reason: state.completion_reason(),
        }
    }
}

/// Handler for session summaries.
pub struct GetInterviewHandler {
    store: Arc<dyn SessionStore>,
}

impl GetInterviewHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetInterviewQuery) -> Result<InterviewView, InterviewCommandError> {
        let session = self.store.get(&query.interview_id).await?;
        let state = session.lock().await;
        Ok(InterviewView::from(&*state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::interview::test_support::{candidate, fixture};
    use crate::application::handlers::interview::{StartInterviewCommand, StartInterviewHandler};
    use crate::domain::interview::{InterviewPhase, PhasePlan};

    #[tokio::test]
    async fn test_get_interview_reports_progress() {
        let fx = fixture(7.0);
        let start = StartInterviewHandler::new(fx.engine.clone(), fx.store.clone(), PhasePlan::default());
        let started = start
            .handle(StartInterviewCommand {
                job_description: "Build Rust services".to_string(),
                candidate: candidate(),
                plan: None,
            })
            .await
            .unwrap();
        let handler = GetInterviewHandler::new(fx.store.clone());

        let view = handler
            .handle(GetInterviewQuery {
                interview_id: started.interview_id,
            })
            .await
            .unwrap();

        assert_eq!(view.status, InterviewStatus::InProgress);
        assert_eq!(view.candidate_name, "Ada Lovelace");
        assert_eq!(view.current_phase.unwrap().phase, InterviewPhase::Introduction);
        assert_eq!(view.total_phases, 6);
        assert_eq!(view.questions_asked, 1);
        assert_eq!(view.answers_given, 0);
        assert_eq!(view.pending_question.unwrap().id, started.first_question.id);
        assert!(view.completion_reason.is_none());
    }

    #[tokio::test]
    async fn test_get_interview_unknown_not_found() {
        let fx = fixture(7.0);
        let handler = GetInterviewHandler::new(fx.store);
        let id = InterviewId::new();

        let err = handler.handle(GetInterviewQuery { interview_id: id }).await.unwrap_err();
        assert_eq!(err, InterviewCommandError::NotFound(id));
    }
}
