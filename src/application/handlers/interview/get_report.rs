//! GetReportHandler - Query handler for the final report.

use std::sync::Arc;

use super::InterviewCommandError;
use crate::application::engine::InterviewEngine;
use crate::domain::foundation::InterviewId;
use crate::domain::interview::InterviewReport;
use crate::ports::SessionStore;

/// Query for a completed interview's report.
#[derive(Debug, Clone)]
pub struct GetReportQuery {
    pub interview_id: InterviewId,
}

/// Handler for report reads. Repeated reads return the same cached report.
pub struct GetReportHandler {
    engine: Arc<InterviewEngine>,
    store: Arc<dyn SessionStore>,
}

impl GetReportHandler {
    pub fn new(engine: Arc<InterviewEngine>, store: Arc<dyn SessionStore>) -> Self {
        Self { engine, store }
    }

    pub async fn handle(&self, query: GetReportQuery) -> Result<InterviewReport, InterviewCommandError> {
        let session = self.store.get(&query.interview_id).await?;
        let state = session.lock().await;
        Ok(self.engine.report(&state)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::interview::test_support::{candidate, fixture};
    use crate::application::handlers::interview::{
        EndInterviewCommand, EndInterviewHandler, StartInterviewCommand, StartInterviewHandler,
    };
    use crate::domain::interview::{CompletionReason, InterviewError, PhasePlan};

    #[tokio::test]
    async fn test_get_report_before_completion_is_invalid_state() {
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
        let handler = GetReportHandler::new(fx.engine.clone(), fx.store.clone());

        let err = handler
            .handle(GetReportQuery {
                interview_id: started.interview_id,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InterviewCommandError::Interview(InterviewError::InvalidStateTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_report_is_idempotent() {
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
        EndInterviewHandler::new(fx.engine.clone(), fx.store.clone())
            .handle(EndInterviewCommand {
                interview_id: started.interview_id,
                evict: false,
            })
            .await
            .unwrap();
        let handler = GetReportHandler::new(fx.engine.clone(), fx.store.clone());
        let query = GetReportQuery {
            interview_id: started.interview_id,
        };

        let first = handler.handle(query.clone()).await.unwrap();
        let second = handler.handle(query).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.completion_reason, CompletionReason::EndedByCaller);
    }
}
