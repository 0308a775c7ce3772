//! SubmitAnswerHandler - Command handler for text answers.

use std::sync::Arc;

use super::InterviewCommandError;
use crate::application::engine::{AnswerSubmission, InterviewEngine, TurnOutcome};
use crate::domain::foundation::InterviewId;
use crate::domain::interview::VoiceFeatures;
use crate::ports::SessionStore;

/// Command to answer the pending question.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub interview_id: InterviewId,
    pub answer: String,
    pub voice: Option<VoiceFeatures>,
}

/// Handler for text answers.
pub struct SubmitAnswerHandler {
    engine: Arc<InterviewEngine>,
    store: Arc<dyn SessionStore>,
}

impl SubmitAnswerHandler {
    pub fn new(engine: Arc<InterviewEngine>, store: Arc<dyn SessionStore>) -> Self {
        Self { engine, store }
    }

    /// Runs the turn on its own task so that dropping the caller's future
    /// (client disconnect, request timeout) cannot stop it halfway.
    pub async fn handle(&self, cmd: SubmitAnswerCommand) -> Result<TurnOutcome, InterviewCommandError> {
        let session = self.store.get(&cmd.interview_id).await?;
        let engine = Arc::clone(&self.engine);
        let submission = AnswerSubmission {
            text: cmd.answer,
            voice: cmd.voice,
        };

        let turn = tokio::spawn(async move {
            let mut state = session.lock_owned().await;
            engine.submit_answer(&mut state, submission).await
        });
        Ok(turn.await??)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::TurnAction;
    use crate::application::handlers::interview::test_support::{candidate, fixture};
    use crate::application::handlers::interview::{StartInterviewCommand, StartInterviewHandler};
    use crate::domain::interview::{Difficulty, InterviewPhase, PhasePlan, PhaseSpec};

    async fn started(score: f64, plan: PhasePlan) -> (SubmitAnswerHandler, InterviewId) {
        let fx = fixture(score);
        let start = StartInterviewHandler::new(fx.engine.clone(), fx.store.clone(), plan);
        let result = start
            .handle(StartInterviewCommand {
                job_description: "Build Rust services".to_string(),
                candidate: candidate(),
                plan: None,
            })
            .await
            .unwrap();
        (SubmitAnswerHandler::new(fx.engine, fx.store), result.interview_id)
    }

    #[tokio::test]
    async fn test_submit_answer_moves_to_next_phase_on_good_score() {
        let (handler, id) = started(8.0, PhasePlan::default()).await;

        let outcome = handler
            .handle(SubmitAnswerCommand {
                interview_id: id,
                answer: "I have six years of backend work".to_string(),
                voice: Some(VoiceFeatures::new(130.0, 0.4)),
            })
            .await
            .unwrap();

        assert_eq!(outcome.action, TurnAction::NextPhase);
        let answer = outcome.answer.unwrap();
        assert_eq!(answer.weighted_score.value(), 8.0);
        assert!(answer.voice.is_some());
        assert_eq!(outcome.phases_completed, 1);
        assert_eq!(outcome.next_question.unwrap().phase, InterviewPhase::Technical);
    }

    #[tokio::test]
    async fn test_submit_answer_low_score_asks_follow_up() {
        let (handler, id) = started(3.0, PhasePlan::default()).await;

        let outcome = handler
            .handle(SubmitAnswerCommand {
                interview_id: id,
                answer: "Not sure".to_string(),
                voice: None,
            })
            .await
            .unwrap();

        assert_eq!(outcome.action, TurnAction::FollowUp);
        assert!(outcome.next_question.unwrap().is_follow_up());
    }

    #[tokio::test]
    async fn test_submit_answer_completes_single_phase_plan() {
        let plan = PhasePlan::new(vec![PhaseSpec::new(InterviewPhase::Introduction, Difficulty::Easy, 1)]).unwrap();
        let (handler, id) = started(8.0, plan).await;

        let outcome = handler
            .handle(SubmitAnswerCommand {
                interview_id: id,
                answer: "Hello".to_string(),
                voice: None,
            })
            .await
            .unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.report.unwrap().overall_score(), 8.0);

        let err = handler
            .handle(SubmitAnswerCommand {
                interview_id: id,
                answer: "Again".to_string(),
                voice: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewCommandError::Interview(_)));
    }

    #[tokio::test]
    async fn test_submit_answer_unknown_interview_not_found() {
        let (handler, _) = started(7.0, PhasePlan::default()).await;
        let missing = InterviewId::new();

        let err = handler
            .handle(SubmitAnswerCommand {
                interview_id: missing,
                answer: "Hi".to_string(),
                voice: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err, InterviewCommandError::NotFound(missing));
    }

    #[tokio::test]
    async fn test_dropped_request_still_completes_the_turn() {
        use crate::adapters::clock::SystemClock;
        use crate::adapters::scripted::HangingCollaborator;
        use crate::application::engine::{Collaborators, EngineSettings};
        use std::time::Duration;

        let fx = fixture(7.0);
        let settings = EngineSettings {
            collaborator_timeout: Duration::from_millis(50),
            ..EngineSettings::default()
        };
        let slow_engine = Arc::new(InterviewEngine::new(
            Collaborators {
                evaluator: Arc::new(HangingCollaborator),
                ..fx.engine.collaborators().clone()
            },
            Arc::new(SystemClock),
            settings,
        ));
        let start = StartInterviewHandler::new(slow_engine.clone(), fx.store.clone(), PhasePlan::default());
        let id = start
            .handle(StartInterviewCommand {
                job_description: "Build Rust services".to_string(),
                candidate: candidate(),
                plan: None,
            })
            .await
            .unwrap()
            .interview_id;
        let handler = SubmitAnswerHandler::new(slow_engine, fx.store.clone());

        let dropped = tokio::time::timeout(
            Duration::from_millis(10),
            handler.handle(SubmitAnswerCommand {
                interview_id: id,
                answer: "Slow to score".to_string(),
                voice: None,
            }),
        )
        .await;
        assert!(dropped.is_err());

        let session = fx.store.get(&id).await.unwrap();
        let state = session.lock().await;
        assert_eq!(state.answers().len(), 1);
        assert_eq!(state.questions().len(), 2);
        assert!(state.pending_question().is_some());
    }
}
