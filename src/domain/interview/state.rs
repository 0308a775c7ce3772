//! Session aggregate: everything one interview knows about itself.
//!
//! `SessionState` is pure data plus invariant-enforcing mutations. It never
//! talks to collaborators; the application engine does that and feeds the
//! results in here.

use chrono::Duration;

use super::answer::{Answer, Evaluation};
use super::candidate::CandidateProfile;
use super::decision::CompletionReason;
use super::errors::InterviewError;
use super::fallback::{CollaboratorKind, FallbackRecord};
use super::phase::{PhasePlan, PhaseSpec};
use super::phase_record::PhaseRecord;
use super::question::{GenerationSource, Question, QuestionDraft};
use super::report::InterviewReport;
use super::scoring::ScoreAggregator;
use super::voice::VoiceSummary;
use crate::domain::foundation::{InterviewId, InterviewStatus, QuestionId, Score, StateMachine, Timestamp};

/// Interview session aggregate.
///
/// # Invariants
///
/// - `answers.len() <= questions.len()`, and `answers[i]` answers `questions[i]`
/// - at most one `PhaseRecord` per phase index, appended when the phase is left
/// - `current_phase_index` never decreases
/// - once `Completed`, only the report may be read
#[derive(Debug, Clone)]
pub struct SessionState {
    id: InterviewId,
    candidate: CandidateProfile,
    job_description: String,
    plan: PhasePlan,
    current_phase_index: usize,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    phase_records: Vec<PhaseRecord>,
    fallbacks: Vec<FallbackRecord>,
    status: InterviewStatus,
    created_at: Timestamp,
    started_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    completion_reason: Option<CompletionReason>,
    report: Option<InterviewReport>,
}

impl SessionState {
    /// Creates a session that has not started yet.
    ///
    /// # Errors
    ///
    /// - `Validation` if the candidate profile is incomplete
    pub fn new(
        id: InterviewId,
        candidate: CandidateProfile,
        job_description: impl Into<String>,
        plan: PhasePlan,
        now: Timestamp,
    ) -> Result<Self, InterviewError> {
        candidate.validate()?;

        Ok(Self {
            id,
            candidate,
            job_description: job_description.into(),
            plan,
            current_phase_index: 0,
            questions: Vec::new(),
            answers: Vec::new(),
            phase_records: Vec::new(),
            fallbacks: Vec::new(),
            status: InterviewStatus::NotStarted,
            created_at: now,
            started_at: None,
            completed_at: None,
            completion_reason: None,
            report: None,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &InterviewId {
        &self.id
    }

    pub fn candidate(&self) -> &CandidateProfile {
        &self.candidate
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn plan(&self) -> &PhasePlan {
        &self.plan
    }

    pub fn status(&self) -> InterviewStatus {
        self.status
    }

    pub fn current_phase_index(&self) -> usize {
        self.current_phase_index
    }

    /// Spec of the phase the session is in.
    pub fn current_phase(&self) -> Result<&PhaseSpec, InterviewError> {
        self.plan.phase_at(self.current_phase_index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn phase_records(&self) -> &[PhaseRecord] {
        &self.phase_records
    }

    pub fn fallbacks(&self) -> &[FallbackRecord] {
        &self.fallbacks
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn started_at(&self) -> Option<&Timestamp> {
        self.started_at.as_ref()
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.completion_reason
    }

    /// Weighted scores of every answer, in order.
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.answers.iter().map(|a| a.weighted_score.value())
    }

    /// The question awaiting an answer, if any.
    pub fn pending_question(&self) -> Option<&Question> {
        if self.questions.len() > self.answers.len() {
            self.questions.last()
        } else {
            None
        }
    }

    /// Follow-up questions asked in the phase at `phase_index`.
    pub fn follow_up_count(&self, phase_index: usize) -> u32 {
        self.questions
            .iter()
            .filter(|q| q.phase_index == phase_index && q.is_follow_up())
            .count() as u32
    }

    /// Primary questions asked in the phase at `phase_index`.
    pub fn primary_count(&self, phase_index: usize) -> u32 {
        self.questions
            .iter()
            .filter(|q| q.phase_index == phase_index && q.is_primary())
            .count() as u32
    }

    pub fn answers_in_phase(&self, phase_index: usize) -> impl Iterator<Item = &Answer> + '_ {
        self.answers
            .iter()
            .filter(move |a| a.phase_index == phase_index)
    }

    /// Mean weighted score over all answers so far; 0.0 with none.
    pub fn average_answer_score(&self) -> f64 {
        ScoreAggregator::phase_average(&self.answers)
    }

    /// Time since `begin`, or `None` if the session never started.
    pub fn elapsed(&self, now: Timestamp) -> Option<Duration> {
        let end = self.completed_at.unwrap_or(now);
        self.started_at.map(|start| end.duration_since(&start))
    }

    /// Completed phase records over total phases in the plan.
    pub fn phase_progress(&self) -> (usize, usize) {
        (self.phase_records.len(), self.plan.len())
    }

    /// Bounded transcript of prior questions and answers.
    ///
    /// Each answer is cut to `preview_chars` characters so the prompt built
    /// from it stays small however long the interview runs.
    pub fn conversation_history(&self, preview_chars: usize) -> String {
        let mut lines = Vec::with_capacity(self.questions.len() * 2);
        for (i, question) in self.questions.iter().enumerate() {
            lines.push(format!("Q{}: {}", i + 1, question.text));
            if let Some(answer) = self.answers.get(i) {
                lines.push(format!("A{}: {}", i + 1, preview(&answer.text, preview_chars)));
            }
        }
        lines.join("\n")
    }

    /// The cached final report.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the session is completed
    pub fn report(&self) -> Result<&InterviewReport, InterviewError> {
        if !self.status.is_completed() {
            return Err(InterviewError::invalid_transition(self.status, "read the report"));
        }
        self.report
            .as_ref()
            .ok_or_else(|| InterviewError::invalid_transition(self.status, "read the report"))
    }

    pub fn has_report(&self) -> bool {
        self.report.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// NotStarted -> InProgress.
    pub fn begin(&mut self, now: Timestamp) -> Result<(), InterviewError> {
        self.status = self
            .status
            .transition_to(InterviewStatus::InProgress)
            .map_err(|_| InterviewError::invalid_transition(self.status, "start the interview"))?;
        self.started_at = Some(now);
        Ok(())
    }

    /// Appends a question for the current phase.
    ///
    /// `follow_up_of` marks the question as a follow-up of an earlier one.
    pub fn ask(
        &mut self,
        draft: QuestionDraft,
        follow_up_of: Option<QuestionId>,
        source: GenerationSource,
        now: Timestamp,
    ) -> Result<&Question, InterviewError> {
        if !self.status.accepts_answers() {
            return Err(InterviewError::invalid_transition(self.status, "ask a question"));
        }
        let spec = *self.current_phase()?;

        self.questions.push(Question {
            id: QuestionId::new(),
            text: draft.text,
            phase: spec.phase,
            phase_index: self.current_phase_index,
            difficulty: spec.difficulty,
            question_type: spec.question_type(),
            expected_skills: draft.expected_skills,
            evaluation_criteria: draft.evaluation_criteria,
            follow_up_of,
            source,
            asked_at: now,
        });

        self.questions
            .last()
            .ok_or(InterviewError::NoActiveQuestion)
    }

    /// Appends the answer to the pending question.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless in progress
    /// - `NoActiveQuestion` if nothing is awaiting an answer
    pub fn record_answer(
        &mut self,
        text: impl Into<String>,
        evaluation: Evaluation,
        weighted_score: Score,
        voice: Option<VoiceSummary>,
        source: GenerationSource,
        now: Timestamp,
    ) -> Result<&Answer, InterviewError> {
        if !self.status.accepts_answers() {
            return Err(InterviewError::invalid_transition(self.status, "submit an answer"));
        }
        let question = self.pending_question().ok_or(InterviewError::NoActiveQuestion)?;
        let question_id = question.id;
        let phase_index = question.phase_index;

        self.answers.push(Answer {
            question_id,
            phase_index,
            text: text.into(),
            dimension_scores: evaluation.dimension_scores,
            weighted_score,
            strengths: evaluation.strengths,
            weaknesses: evaluation.weaknesses,
            feedback: evaluation.feedback,
            follow_up_suggestions: evaluation.follow_up_suggestions,
            voice,
            evaluation_source: source,
            answered_at: now,
        });

        self.answers.last().ok_or(InterviewError::NoActiveQuestion)
    }

    /// Freezes the current phase into a `PhaseRecord`.
    ///
    /// Calling it again for the same phase returns the existing record.
    pub fn close_current_phase(&mut self, now: Timestamp) -> Result<&PhaseRecord, InterviewError> {
        let index = self.current_phase_index;
        let already_closed = self
            .phase_records
            .last()
            .map(|r| r.phase_index == index)
            .unwrap_or(false);

        if !already_closed {
            let spec = *self.current_phase()?;
            let record = PhaseRecord {
                phase: spec.phase,
                phase_index: index,
                difficulty: spec.difficulty,
                primary_questions: self.primary_count(index),
                follow_ups: self.follow_up_count(index),
                average_score: ScoreAggregator::phase_average(self.answers_in_phase(index)),
                completed_at: now,
            };
            self.phase_records.push(record);
        }

        self.phase_records
            .last()
            .ok_or(InterviewError::IndexOutOfRange { index, len: self.plan.len() })
    }

    /// True if the current phase already has a record.
    pub fn current_phase_closed(&self) -> bool {
        self.phase_records
            .last()
            .map(|r| r.phase_index == self.current_phase_index)
            .unwrap_or(false)
    }

    /// Moves to the next phase. Returns `false` when the current phase is
    /// the last one; the index then stays where it is.
    pub fn advance(&mut self) -> bool {
        if self.plan.is_last(self.current_phase_index) {
            return false;
        }
        self.current_phase_index += 1;
        true
    }

    /// InProgress -> Completed.
    pub fn complete(&mut self, reason: CompletionReason, now: Timestamp) -> Result<(), InterviewError> {
        self.status = self
            .status
            .transition_to(InterviewStatus::Completed)
            .map_err(|_| InterviewError::invalid_transition(self.status, "complete the interview"))?;
        self.completed_at = Some(now);
        self.completion_reason = Some(reason);
        Ok(())
    }

    /// Caches the final report. The first report attached wins.
    pub fn attach_report(&mut self, report: InterviewReport) {
        if self.report.is_none() {
            self.report = Some(report);
        }
    }

    pub fn record_fallback(&mut self, collaborator: CollaboratorKind, reason: impl Into<String>, now: Timestamp) {
        self.fallbacks.push(FallbackRecord {
            collaborator,
            reason: reason.into(),
            occurred_at: now,
        });
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
