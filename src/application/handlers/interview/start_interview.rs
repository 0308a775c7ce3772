//! StartInterviewHandler - Command handler for opening an interview.

use std::sync::Arc;

use super::InterviewCommandError;
use crate::application::engine::InterviewEngine;
use crate::domain::foundation::InterviewId;
use crate::domain::interview::{CandidateProfile, PhasePlan, Question, SessionState};
use crate::ports::SessionStore;

/// Command to start a new interview.
#[derive(Debug, Clone)]
pub struct StartInterviewCommand {
    pub job_description: String,
    pub candidate: CandidateProfile,
    /// Overrides the configured phase plan for this interview.
    pub plan: Option<PhasePlan>,
}

/// Result of starting an interview.
#[derive(Debug, Clone)]
pub struct StartInterviewResult {
    pub interview_id: InterviewId,
    pub first_question: Question,
    pub total_phases: usize,
}

/// Handler for starting interviews.
pub struct StartInterviewHandler {
    engine: Arc<InterviewEngine>,
    store: Arc<dyn SessionStore>,
    default_plan: PhasePlan,
}

impl StartInterviewHandler {
    pub fn new(engine: Arc<InterviewEngine>, store: Arc<dyn SessionStore>, default_plan: PhasePlan) -> Self {
        Self {
            engine,
            store,
            default_plan,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartInterviewCommand,
    ) -> Result<StartInterviewResult, InterviewCommandError> {
        // 1. Build the session; validates the candidate profile
        let plan = cmd.plan.unwrap_or_else(|| self.default_plan.clone());
        let mut state = SessionState::new(
            InterviewId::new(),
            cmd.candidate,
            cmd.job_description,
            plan,
            self.engine.clock().now(),
        )?;

        // 2. Start it before anyone else can see it
        let first_question = self.engine.start(&mut state).await?;
        let interview_id = *state.id();
        let total_phases = state.plan().len();

        // 3. Register
        self.store.insert(state).await?;

        Ok(StartInterviewResult {
            interview_id,
            first_question,
            total_phases,
        })
    }
}
