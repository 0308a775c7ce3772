//! SubmitAudioAnswerHandler - Command handler for spoken answers.

use std::sync::Arc;

use super::InterviewCommandError;
use crate::application::engine::{InterviewEngine, TurnOutcome};
use crate::domain::foundation::InterviewId;
use crate::domain::interview::VoiceFeatures;
use crate::ports::{AudioInput, SessionStore};

/// Command to answer the pending question with a recording.
#[derive(Debug, Clone)]
pub struct SubmitAudioAnswerCommand {
    pub interview_id: InterviewId,
    pub audio: AudioInput,
    pub voice: Option<VoiceFeatures>,
}

/// Handler for audio answers.
pub struct SubmitAudioAnswerHandler {
    engine: Arc<InterviewEngine>,
    store: Arc<dyn SessionStore>,
}

impl SubmitAudioAnswerHandler {
    pub fn new(engine: Arc<InterviewEngine>, store: Arc<dyn SessionStore>) -> Self {
        Self { engine, store }
    }

    pub async fn handle(&self, cmd: SubmitAudioAnswerCommand) -> Result<TurnOutcome, InterviewCommandError> {
        let session = self.store.get(&cmd.interview_id).await?;
        let engine = Arc::clone(&self.engine);

        // Detached like text answers; see `SubmitAnswerHandler::handle`
        let turn = tokio::spawn(async move {
            let mut state = session.lock_owned().await;
            engine
                .submit_audio_answer(&mut state, cmd.audio, cmd.voice)
                .await
        });
        Ok(turn.await??)
    }
}
