//! InterviewEngine - drives a `SessionState` through its collaborators.
//!
//! The engine is stateless and shared by every session. Each operation takes
//! the session it acts on by `&mut`, so callers serialize access per session
//! (the session store hands out one mutex per interview).
//!
//! Operations mutate the session across several awaits. Callers must drive
//! each one to completion; the handlers run them on a spawned task.
//!
//! # Failure policy
//!
//! State-machine misuse is returned as `InterviewError` and never mutates the
//! session. Collaborator failures and timeouts are never returned: a fixed
//! fallback is used, the degradation is logged and recorded on the session,
//! and the interview carries on.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::fallback;
use super::outcome::{AnswerSubmission, TurnAction, TurnOutcome};
use crate::domain::foundation::Score;
use crate::domain::interview::{
    Answer, CompletionReason, DecisionPolicy, Evaluation, GenerationSource, InterviewError,
    InterviewReport, NextAction, PhaseWeights, Question, QuestionDraft, ReportAssembler,
    ScoreAggregator, SessionState, TerminationGuard, VoiceFeatures, VoiceSummary,
    NARRATIVE_SAMPLE_ANSWERS,
};
use crate::ports::{
    AnswerEvaluator, AudioInput, Clock, CollaboratorError, CollaboratorKind, EvaluationRequest,
    FollowUpRequest, NarrativeRequest, QuestionGenerator, QuestionRequest, ReportNarrator,
    Transcriber,
};

/// Tunables for the engine.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub policy: DecisionPolicy,
    pub guard: TerminationGuard,
    pub weights: PhaseWeights,
    /// Characters of each answer kept in the generation history.
    pub history_preview_chars: usize,
    /// Upper bound on any single collaborator call.
    pub collaborator_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            policy: DecisionPolicy::default(),
            guard: TerminationGuard::default(),
            weights: PhaseWeights::default(),
            history_preview_chars: 100,
            collaborator_timeout: Duration::from_secs(30),
        }
    }
}

/// The external services an interview depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub questions: Arc<dyn QuestionGenerator>,
    pub evaluator: Arc<dyn AnswerEvaluator>,
    pub transcriber: Arc<dyn Transcriber>,
    pub narrator: Arc<dyn ReportNarrator>,
}

/// Runs the interview state machine.
pub struct InterviewEngine {
    collaborators: Collaborators,
    clock: Arc<dyn Clock>,
    settings: EngineSettings,
}

impl InterviewEngine {
    pub fn new(collaborators: Collaborators, clock: Arc<dyn Clock>, settings: EngineSettings) -> Self {
        Self {
            collaborators,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts the interview and asks the first question.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the session has not started
    pub async fn start(&self, state: &mut SessionState) -> Result<Question, InterviewError> {
        state.begin(self.clock.now())?;
        info!(
            interview_id = %state.id(),
            candidate = %state.candidate().name,
            phases = state.plan().len(),
            "Interview started"
        );
        self.ask_primary(state).await
    }

    /// Scores an answer to the pending question and moves the interview on.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the session is in progress
    /// - `NoActiveQuestion` if no question is awaiting an answer
    pub async fn submit_answer(
        &self,
        state: &mut SessionState,
        submission: AnswerSubmission,
    ) -> Result<TurnOutcome, InterviewError> {
        if !state.status().accepts_answers() {
            return Err(InterviewError::invalid_transition(state.status(), "submit an answer"));
        }
        let question = state
            .pending_question()
            .cloned()
            .ok_or(InterviewError::NoActiveQuestion)?;

        if let Some(reason) = self.settings.guard.evaluate(state, self.clock.now()) {
            let report = self.finish(state, reason).await?;
            return Ok(self.completed(state, None, report));
        }

        let (evaluation, score, source) = self.score_answer(state, &question, &submission.text).await;
        let voice = submission.voice.as_ref().map(VoiceSummary::from_features);
        let answer = state
            .record_answer(submission.text, evaluation, score, voice, source, self.clock.now())?
            .clone();

        if let Some(reason) = self.settings.guard.evaluate(state, self.clock.now()) {
            let report = self.finish(state, reason).await?;
            return Ok(self.completed(state, Some(answer), report));
        }

        let index = state.current_phase_index();
        let quota = state.current_phase()?.quota;
        let follow_ups = state.follow_up_count(index);
        let primaries = state.primary_count(index);
        let action = self
            .settings
            .policy
            .decide(score.value(), follow_ups, primaries, quota);

        debug!(
            interview_id = %state.id(),
            phase_index = index,
            score = score.value(),
            follow_ups,
            primaries,
            quota,
            action = %action,
            "Decided next action"
        );

        let next = match action {
            NextAction::FollowUp => self.ask_follow_up(state, &question, &answer).await?,
            NextAction::Continue => self.ask_primary(state).await?,
            NextAction::NextPhase => {
                let record = state.close_current_phase(self.clock.now())?.clone();
                info!(
                    interview_id = %state.id(),
                    phase = %record.phase,
                    phase_index = record.phase_index,
                    average_score = record.average_score,
                    "Phase completed"
                );

                if !state.advance() {
                    let report = self.finish(state, CompletionReason::AllPhasesCompleted).await?;
                    return Ok(self.completed(state, Some(answer), report));
                }
                self.ask_primary(state).await?
            }
        };

        let (phases_completed, total_phases) = state.phase_progress();
        Ok(TurnOutcome {
            action: TurnAction::from(action),
            answer: Some(answer),
            next_question: Some(next),
            report: None,
            phases_completed,
            total_phases,
            question_number: state.questions().len(),
        })
    }

    /// Transcribes spoken audio, then submits it as a text answer.
    ///
    /// A failed transcription is recorded and submitted as an empty answer.
    /// When no voice features are supplied, the speech rate is derived from
    /// the transcript duration if the transcriber reported one.
    pub async fn submit_audio_answer(
        &self,
        state: &mut SessionState,
        audio: AudioInput,
        voice: Option<VoiceFeatures>,
    ) -> Result<TurnOutcome, InterviewError> {
        if !state.status().accepts_answers() {
            return Err(InterviewError::invalid_transition(state.status(), "submit an answer"));
        }
        if state.pending_question().is_none() {
            return Err(InterviewError::NoActiveQuestion);
        }

        let transcriber = Arc::clone(&self.collaborators.transcriber);
        let transcript = match self.bounded(transcriber.transcribe(&audio)).await {
            Ok(transcript) => Some(transcript),
            Err(err) => {
                self.degrade(state, CollaboratorKind::Transcriber, err.to_string());
                None
            }
        };

        let voice = voice.or_else(|| {
            transcript
                .as_ref()
                .and_then(|t| t.speech_rate())
                .map(|rate| VoiceFeatures {
                    speech_rate: Some(rate),
                    pause_frequency: None,
                })
        });

        let submission = AnswerSubmission {
            text: transcript.map(|t| t.text).unwrap_or_default(),
            voice,
        };
        self.submit_answer(state, submission).await
    }

    /// Ends an in-progress interview early and assembles its report.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the session is in progress
    pub async fn end(&self, state: &mut SessionState) -> Result<InterviewReport, InterviewError> {
        if !state.status().accepts_answers() {
            return Err(InterviewError::invalid_transition(state.status(), "end the interview"));
        }
        self.finish(state, CompletionReason::EndedByCaller).await
    }

    /// Returns the cached report. Repeated calls return identical reports.
    pub fn report(&self, state: &SessionState) -> Result<InterviewReport, InterviewError> {
        state.report().cloned()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Collaborator calls with fallbacks
    // ─────────────────────────────────────────────────────────────────────────

    async fn ask_primary(&self, state: &mut SessionState) -> Result<Question, InterviewError> {
        let spec = *state.current_phase()?;
        let request = QuestionRequest {
            interview_id: *state.id(),
            job_description: state.job_description().to_string(),
            candidate: state.candidate().clone(),
            phase: spec.phase,
            difficulty: spec.difficulty,
            question_type: spec.question_type(),
            history: state.conversation_history(self.settings.history_preview_chars),
        };

        let generator = Arc::clone(&self.collaborators.questions);
        let (draft, source) = match self.bounded(generator.generate_question(&request)).await {
            Ok(draft) if !draft.text.trim().is_empty() => (draft, GenerationSource::Generated),
            Ok(_) => {
                self.degrade(state, CollaboratorKind::QuestionGenerator, "empty question text");
                (fallback::default_question(), GenerationSource::Fallback)
            }
            Err(err) => {
                self.degrade(state, CollaboratorKind::QuestionGenerator, err.to_string());
                (fallback::default_question(), GenerationSource::Fallback)
            }
        };

        Ok(state.ask(draft, None, source, self.clock.now())?.clone())
    }

    async fn ask_follow_up(
        &self,
        state: &mut SessionState,
        original: &Question,
        answer: &Answer,
    ) -> Result<Question, InterviewError> {
        let request = FollowUpRequest {
            interview_id: *state.id(),
            original_question: original.text.clone(),
            answer_text: answer.text.clone(),
            strengths: answer.strengths.clone(),
            weaknesses: answer.weaknesses.clone(),
        };

        let generator = Arc::clone(&self.collaborators.questions);
        let (text, source) = match self.bounded(generator.generate_follow_up(&request)).await {
            Ok(text) if !text.trim().is_empty() => (text, GenerationSource::Generated),
            Ok(_) => {
                self.degrade(state, CollaboratorKind::QuestionGenerator, "empty follow-up text");
                (fallback::DEFAULT_FOLLOW_UP.to_string(), GenerationSource::Fallback)
            }
            Err(err) => {
                self.degrade(state, CollaboratorKind::QuestionGenerator, err.to_string());
                (fallback::DEFAULT_FOLLOW_UP.to_string(), GenerationSource::Fallback)
            }
        };

        let draft = QuestionDraft::new(text)
            .with_expected_skills(original.expected_skills.clone())
            .with_evaluation_criteria(original.evaluation_criteria.clone());

        Ok(state
            .ask(draft, Some(original.id), source, self.clock.now())?
            .clone())
    }

    /// Evaluates and scores an answer. Unusable evaluations, including
    /// out-of-range dimension scores, fall back to the neutral evaluation.
    async fn score_answer(
        &self,
        state: &mut SessionState,
        question: &Question,
        text: &str,
    ) -> (Evaluation, Score, GenerationSource) {
        let request = EvaluationRequest {
            interview_id: *state.id(),
            question_text: question.text.clone(),
            answer_text: text.to_string(),
            expected_skills: question.expected_skills.clone(),
            evaluation_criteria: question.evaluation_criteria.clone(),
        };

        let evaluator = Arc::clone(&self.collaborators.evaluator);
        let scored = self
            .bounded(evaluator.evaluate_answer(&request))
            .await
            .map_err(|e| e.to_string())
            .and_then(|evaluation| {
                ScoreAggregator::weighted_answer_score(&evaluation.dimension_scores)
                    .map(|score| (evaluation, score))
                    .map_err(|e| e.to_string())
            });

        match scored {
            Ok((evaluation, score)) => (evaluation, score, GenerationSource::Generated),
            Err(reason) => {
                self.degrade(state, CollaboratorKind::AnswerEvaluator, reason);
                (fallback::default_evaluation(), Score::NEUTRAL, GenerationSource::Fallback)
            }
        }
    }

    /// Completes the session and assembles the report exactly once.
    async fn finish(
        &self,
        state: &mut SessionState,
        reason: CompletionReason,
    ) -> Result<InterviewReport, InterviewError> {
        let now = self.clock.now();
        let index = state.current_phase_index();
        if !state.current_phase_closed() && state.answers_in_phase(index).next().is_some() {
            state.close_current_phase(now)?;
        }
        state.complete(reason, now)?;

        if reason.is_early() {
            info!(
                interview_id = %state.id(),
                reason = %reason,
                answered = state.answers().len(),
                "Termination guard ended interview"
            );
        }

        let stats = ReportAssembler::stats(state, &self.settings.weights, now);
        let request = NarrativeRequest {
            interview_id: *state.id(),
            candidate: state.candidate().clone(),
            job_description: state.job_description().to_string(),
            stats: stats.clone(),
            completion_reason: reason,
            answer_highlights: ReportAssembler::answer_highlights(state, NARRATIVE_SAMPLE_ANSWERS),
        };

        let narrator = Arc::clone(&self.collaborators.narrator);
        let (narrative, source) = match self.bounded(narrator.generate_report_narrative(&request)).await {
            Ok(text) if !text.trim().is_empty() => (text, GenerationSource::Generated),
            Ok(_) => {
                self.degrade(state, CollaboratorKind::ReportNarrator, "empty narrative");
                (fallback::failed_narrative("empty narrative", reason), GenerationSource::Fallback)
            }
            Err(err) => {
                let reason_text = err.to_string();
                self.degrade(state, CollaboratorKind::ReportNarrator, reason_text.clone());
                (fallback::failed_narrative(&reason_text, reason), GenerationSource::Fallback)
            }
        };

        let report = ReportAssembler::assemble(state, stats, narrative, source);
        state.attach_report(report.clone());

        info!(
            interview_id = %state.id(),
            overall_score = report.overall_score(),
            recommendation = %report.recommendation(),
            reason = %reason,
            "Interview completed"
        );

        Ok(report)
    }

    fn completed(&self, state: &SessionState, answer: Option<Answer>, report: InterviewReport) -> TurnOutcome {
        let (phases_completed, total_phases) = state.phase_progress();
        TurnOutcome {
            action: TurnAction::Complete,
            answer,
            next_question: None,
            report: Some(report),
            phases_completed,
            total_phases,
            question_number: state.questions().len(),
        }
    }

    /// Bounds a collaborator call by the configured timeout.
    async fn bounded<T, F>(&self, call: F) -> Result<T, CollaboratorError>
    where
        F: Future<Output = Result<T, CollaboratorError>>,
    {
        match tokio::time::timeout(self.settings.collaborator_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CollaboratorError::Timeout {
                secs: self.settings.collaborator_timeout.as_secs(),
            }),
        }
    }

    fn degrade(&self, state: &mut SessionState, kind: CollaboratorKind, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(
            interview_id = %state.id(),
            collaborator = %kind,
            reason = %reason,
            "Collaborator failed, using fallback"
        );
        state.record_fallback(kind, reason, self.clock.now());
    }
}
