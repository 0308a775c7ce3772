//! EndInterviewHandler - Command handler for ending an interview early.

use std::sync::Arc;

use tracing::info;

use super::InterviewCommandError;
use crate::application::engine::InterviewEngine;
use crate::domain::foundation::InterviewId;
use crate::domain::interview::InterviewReport;
use crate::ports::SessionStore;

/// Command to end an interview.
///
/// An in-progress interview is completed early. A completed one can only be
/// released: with `evict` set its cached report is returned and the session
/// dropped, otherwise the call is an invalid state transition.
#[derive(Debug, Clone)]
pub struct EndInterviewCommand {
    pub interview_id: InterviewId,
    /// Drop the session from the store once its report is built.
    pub evict: bool,
}

/// Handler for ending interviews.
pub struct EndInterviewHandler {
    engine: Arc<InterviewEngine>,
    store: Arc<dyn SessionStore>,
}

impl EndInterviewHandler {
    pub fn new(engine: Arc<InterviewEngine>, store: Arc<dyn SessionStore>) -> Self {
        Self { engine, store }
    }

    pub async fn handle(&self, cmd: EndInterviewCommand) -> Result<InterviewReport, InterviewCommandError> {
        let session = self.store.get(&cmd.interview_id).await?;
        let engine = Arc::clone(&self.engine);
        let evict = cmd.evict;

        let ending = tokio::spawn(async move {
            let mut state = session.lock_owned().await;
            if evict && state.status().is_completed() {
                engine.report(&state)
            } else {
                engine.end(&mut state).await
            }
        });
        let report = ending.await??;

        if cmd.evict {
            self.store.evict(&cmd.interview_id).await?;
            info!(interview_id = %cmd.interview_id, "Interview evicted");
        }

        Ok(report)
    }
}
