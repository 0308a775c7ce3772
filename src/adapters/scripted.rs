//! Scripted collaborators for tests and offline demos.
//!
//! Each adapter replays queued results in order. Once a queue runs dry it
//! falls back to a deterministic default, so a test only scripts the turns it
//! cares about.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::interview::{DimensionScores, Evaluation, QuestionDraft};
use crate::ports::{
    AnswerEvaluator, AudioInput, CollaboratorError, EvaluationRequest, FollowUpRequest,
    NarrativeRequest, QuestionGenerator, QuestionRequest, ReportNarrator, Transcriber, Transcript,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ─────────────────────────────────────────────────────────────────────────────
// Question generation
// ─────────────────────────────────────────────────────────────────────────────

/// Replays scripted questions; unscripted calls yield "Question N".
#[derive(Debug, Default)]
pub struct ScriptedQuestionGenerator {
    questions: Mutex<VecDeque<Result<QuestionDraft, CollaboratorError>>>,
    follow_ups: Mutex<VecDeque<Result<String, CollaboratorError>>>,
    question_requests: Mutex<Vec<QuestionRequest>>,
    follow_up_requests: Mutex<Vec<FollowUpRequest>>,
}

impl ScriptedQuestionGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_question(self, draft: QuestionDraft) -> Self {
        lock(&self.questions).push_back(Ok(draft));
        self
    }

    pub fn with_question_error(self, error: CollaboratorError) -> Self {
        lock(&self.questions).push_back(Err(error));
        self
    }

    pub fn with_follow_up(self, text: impl Into<String>) -> Self {
        lock(&self.follow_ups).push_back(Ok(text.into()));
        self
    }

    pub fn with_follow_up_error(self, error: CollaboratorError) -> Self {
        lock(&self.follow_ups).push_back(Err(error));
        self
    }

    pub fn question_requests(&self) -> Vec<QuestionRequest> {
        lock(&self.question_requests).clone()
    }

    pub fn follow_up_requests(&self) -> Vec<FollowUpRequest> {
        lock(&self.follow_up_requests).clone()
    }
}

#[async_trait]
impl QuestionGenerator for ScriptedQuestionGenerator {
    async fn generate_question(&self, request: &QuestionRequest) -> Result<QuestionDraft, CollaboratorError> {
        let number = {
            let mut requests = lock(&self.question_requests);
            requests.push(request.clone());
            requests.len()
        };
        lock(&self.questions).pop_front().unwrap_or_else(|| {
            Ok(QuestionDraft::new(format!("Question {} ({})", number, request.phase))
                .with_expected_skills(vec![request.phase.to_string()]))
        })
    }

    async fn generate_follow_up(&self, request: &FollowUpRequest) -> Result<String, CollaboratorError> {
        lock(&self.follow_up_requests).push(request.clone());
        lock(&self.follow_ups)
            .pop_front()
            .unwrap_or_else(|| Ok(format!("Can you expand on: {}", request.original_question)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Evaluation
// ─────────────────────────────────────────────────────────────────────────────

/// Replays scripted evaluations; unscripted answers get a uniform score.
#[derive(Debug)]
pub struct ScriptedEvaluator {
    evaluations: Mutex<VecDeque<Result<Evaluation, CollaboratorError>>>,
    default_score: f64,
    requests: Mutex<Vec<EvaluationRequest>>,
}

impl ScriptedEvaluator {
    /// Scores every unscripted answer `score` on all dimensions.
    pub fn scoring(score: f64) -> Self {
        Self {
            evaluations: Mutex::new(VecDeque::new()),
            default_score: score,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues uniform evaluations, one per listed score.
    pub fn with_scores(self, scores: impl IntoIterator<Item = f64>) -> Self {
        {
            let mut queue = lock(&self.evaluations);
            for score in scores {
                queue.push_back(Ok(uniform_evaluation(score)));
            }
        }
        self
    }

    pub fn with_evaluation(self, evaluation: Evaluation) -> Self {
        lock(&self.evaluations).push_back(Ok(evaluation));
        self
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        lock(&self.evaluations).push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<EvaluationRequest> {
        lock(&self.requests).clone()
    }
}

impl Default for ScriptedEvaluator {
    fn default() -> Self {
        Self::scoring(7.0)
    }
}

fn uniform_evaluation(score: f64) -> Evaluation {
    Evaluation::new(DimensionScores::uniform(score))
        .with_strengths(vec![format!("Scored {:.1}", score)])
        .with_weaknesses(vec!["Could be more specific".to_string()])
        .with_feedback(format!("Uniform score of {:.1}", score))
}

#[async_trait]
impl AnswerEvaluator for ScriptedEvaluator {
    async fn evaluate_answer(&self, request: &EvaluationRequest) -> Result<Evaluation, CollaboratorError> {
        lock(&self.requests).push(request.clone());
        lock(&self.evaluations)
            .pop_front()
            .unwrap_or_else(|| Ok(uniform_evaluation(self.default_score)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transcription and narration
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the same transcript, or the same error, for every recording.
#[derive(Debug, Clone)]
pub struct ScriptedTranscriber {
    result: Result<Transcript, CollaboratorError>,
}

impl ScriptedTranscriber {
    pub fn new(transcript: Transcript) -> Self {
        Self { result: Ok(transcript) }
    }

    pub fn failing(error: CollaboratorError) -> Self {
        Self { result: Err(error) }
    }
}

impl Default for ScriptedTranscriber {
    fn default() -> Self {
        Self::new(Transcript::new("Transcribed answer"))
    }
}

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&self, _audio: &AudioInput) -> Result<Transcript, CollaboratorError> {
        self.result.clone()
    }
}

/// Returns a fixed narrative and counts how often it was asked.
#[derive(Debug)]
pub struct ScriptedNarrator {
    result: Result<String, CollaboratorError>,
    requests: Mutex<Vec<NarrativeRequest>>,
}

impl ScriptedNarrator {
    pub fn new(narrative: impl Into<String>) -> Self {
        Self {
            result: Ok(narrative.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: CollaboratorError) -> Self {
        Self {
            result: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn requests(&self) -> Vec<NarrativeRequest> {
        lock(&self.requests).clone()
    }
}

impl Default for ScriptedNarrator {
    fn default() -> Self {
        Self::new("Scripted narrative.")
    }
}

#[async_trait]
impl ReportNarrator for ScriptedNarrator {
    async fn generate_report_narrative(&self, request: &NarrativeRequest) -> Result<String, CollaboratorError> {
        lock(&self.requests).push(request.clone());
        self.result.clone()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Always failing / never answering
// ─────────────────────────────────────────────────────────────────────────────

/// Fails every call of every collaborator port with the same error.
#[derive(Debug, Clone)]
pub struct FailingCollaborator(pub CollaboratorError);

impl Default for FailingCollaborator {
    fn default() -> Self {
        Self(CollaboratorError::unavailable("scripted outage"))
    }
}

#[async_trait]
impl QuestionGenerator for FailingCollaborator {
    async fn generate_question(&self, _request: &QuestionRequest) -> Result<QuestionDraft, CollaboratorError> {
        Err(self.0.clone())
    }

    async fn generate_follow_up(&self, _request: &FollowUpRequest) -> Result<String, CollaboratorError> {
        Err(self.0.clone())
    }
}

#[async_trait]
impl AnswerEvaluator for FailingCollaborator {
    async fn evaluate_answer(&self, _request: &EvaluationRequest) -> Result<Evaluation, CollaboratorError> {
        Err(self.0.clone())
    }
}

#[async_trait]
impl Transcriber for FailingCollaborator {
    async fn transcribe(&self, _audio: &AudioInput) -> Result<Transcript, CollaboratorError> {
        Err(self.0.clone())
    }
}

#[async_trait]
impl ReportNarrator for FailingCollaborator {
    async fn generate_report_narrative(&self, _request: &NarrativeRequest) -> Result<String, CollaboratorError> {
        Err(self.0.clone())
    }
}

/// Never completes; exercises the engine's call timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct HangingCollaborator;

#[async_trait]
impl QuestionGenerator for HangingCollaborator {
    async fn generate_question(&self, _request: &QuestionRequest) -> Result<QuestionDraft, CollaboratorError> {
        std::future::pending().await
    }

    async fn generate_follow_up(&self, _request: &FollowUpRequest) -> Result<String, CollaboratorError> {
        std::future::pending().await
    }
}

#[async_trait]
impl AnswerEvaluator for HangingCollaborator {
    async fn evaluate_answer(&self, _request: &EvaluationRequest) -> Result<Evaluation, CollaboratorError> {
        std::future::pending().await
    }
}

#[async_trait]
impl ReportNarrator for HangingCollaborator {
    async fn generate_report_narrative(&self, _request: &NarrativeRequest) -> Result<String, CollaboratorError> {
        std::future::pending().await
    }
}
