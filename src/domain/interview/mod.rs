//! Interview Module - the session state machine and its value types.
//!
//! # Components
//!
//! - `PhasePlan` - Fixed ordered curriculum of phases with difficulty and quota
//! - `ScoreAggregator` - Answer, phase and overall score computation
//! - `DecisionPolicy` / `TerminationGuard` - Follow-up, advance and stop rules
//! - `SessionState` - Aggregate root holding questions, answers and records
//! - `ReportAssembler` - Final report built from session history
//!
//! Nothing here performs I/O. Collaborator calls live in
//! `application::engine`, which feeds their results into `SessionState`.

mod answer;
mod candidate;
mod decision;
mod errors;
mod fallback;
mod phase;
mod phase_record;
mod question;
mod report;
mod scoring;
mod state;
mod voice;

pub use answer::{Answer, DimensionScores, Evaluation, DIMENSIONS};
pub use candidate::{CandidateProfile, MAX_NAME_LENGTH};
pub use decision::{CompletionReason, DecisionPolicy, NextAction, TerminationGuard};
pub use errors::InterviewError;
pub use fallback::{CollaboratorKind, FallbackRecord};
pub use phase::{Difficulty, InterviewPhase, PhasePlan, PhaseSpec, QuestionType};
pub use phase_record::PhaseRecord;
pub use question::{GenerationSource, Question, QuestionDraft};
pub use report::{
    InterviewReport, RecommendationTier, ReportAssembler, ReportStats, MAX_HIGHLIGHTS,
    NARRATIVE_SAMPLE_ANSWERS,
};
pub use scoring::{PhaseWeights, ScoreAggregator, DEFAULT_PHASE_WEIGHT};
pub use state::SessionState;
pub use voice::{VoiceFeatures, VoiceSummary, DEFAULT_PAUSE_FREQUENCY, DEFAULT_SPEECH_RATE_WPM};
