//! Frozen summary of a completed phase.

use serde::{Deserialize, Serialize};

use super::phase::{Difficulty, InterviewPhase};
use crate::domain::foundation::Timestamp;

/// Created exactly once, when the session permanently leaves a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub phase: InterviewPhase,
    pub phase_index: usize,
    pub difficulty: Difficulty,
    /// Primary questions answered in the phase.
    pub primary_questions: u32,
    pub follow_ups: u32,
    /// Mean weighted score over every answer given in the phase.
    pub average_score: f64,
    pub completed_at: Timestamp,
}
