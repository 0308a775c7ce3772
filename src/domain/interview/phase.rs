//! Interview phases and the fixed phase plan.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::errors::InterviewError;

/// A named stage of the interview curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    Introduction,
    Technical,
    Behavioral,
    Scenario,
    Closing,
}

impl InterviewPhase {
    /// Returns every phase tag.
    pub fn all() -> &'static [InterviewPhase] {
        &[
            InterviewPhase::Introduction,
            InterviewPhase::Technical,
            InterviewPhase::Behavioral,
            InterviewPhase::Scenario,
            InterviewPhase::Closing,
        ]
    }

    /// Kind of question the generator is asked for in this phase.
    pub fn question_type(&self) -> QuestionType {
        match self {
            InterviewPhase::Technical | InterviewPhase::Scenario => QuestionType::Technical,
            InterviewPhase::Behavioral => QuestionType::Behavioral,
            InterviewPhase::Introduction | InterviewPhase::Closing => QuestionType::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewPhase::Introduction => "introduction",
            InterviewPhase::Technical => "technical",
            InterviewPhase::Behavioral => "behavioral",
            InterviewPhase::Scenario => "scenario",
            InterviewPhase::Closing => "closing",
        }
    }
}

impl fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Question difficulty for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of question requested from the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    General,
    Technical,
    Behavioral,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::General => "general",
            QuestionType::Technical => "technical",
            QuestionType::Behavioral => "behavioral",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ordered entry of the phase plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpec {
    pub phase: InterviewPhase,
    pub difficulty: Difficulty,
    /// Primary questions required before the phase is complete.
    /// Follow-ups never count against it.
    pub quota: u32,
}

impl PhaseSpec {
    pub const fn new(phase: InterviewPhase, difficulty: Difficulty, quota: u32) -> Self {
        Self {
            phase,
            difficulty,
            quota,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        self.phase.question_type()
    }
}

static DEFAULT_PLAN: Lazy<PhasePlan> = Lazy::new(|| PhasePlan {
    phases: vec![
        PhaseSpec::new(InterviewPhase::Introduction, Difficulty::Easy, 1),
        PhaseSpec::new(InterviewPhase::Technical, Difficulty::Medium, 2),
        PhaseSpec::new(InterviewPhase::Technical, Difficulty::Hard, 2),
        PhaseSpec::new(InterviewPhase::Behavioral, Difficulty::Medium, 2),
        PhaseSpec::new(InterviewPhase::Scenario, Difficulty::Hard, 1),
        PhaseSpec::new(InterviewPhase::Closing, Difficulty::Easy, 1),
    ],
});

/// The fixed, ordered interview curriculum.
///
/// Immutable once constructed; order defines progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PhaseSpec>", into = "Vec<PhaseSpec>")]
pub struct PhasePlan {
    phases: Vec<PhaseSpec>,
}

impl PhasePlan {
    /// Builds a plan, rejecting empty plans and zero quotas.
    pub fn new(phases: Vec<PhaseSpec>) -> Result<Self, InterviewError> {
        if phases.is_empty() {
            return Err(InterviewError::InvalidPhasePlan(
                "plan must contain at least one phase".to_string(),
            ));
        }
        if let Some((index, spec)) = phases.iter().enumerate().find(|(_, s)| s.quota == 0) {
            return Err(InterviewError::InvalidPhasePlan(format!(
                "phase {} ({}) has a zero question quota",
                index, spec.phase
            )));
        }
        Ok(Self { phases })
    }

    /// Parses a plan from a YAML list of phase specs.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, InterviewError> {
        let phases: Vec<PhaseSpec> = serde_yaml::from_str(yaml)
            .map_err(|e| InterviewError::InvalidPhasePlan(e.to_string()))?;
        Self::new(phases)
    }

    /// Loads a plan from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, InterviewError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            InterviewError::InvalidPhasePlan(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Returns the spec at `index`.
    pub fn phase_at(&self, index: usize) -> Result<&PhaseSpec, InterviewError> {
        self.phases.get(index).ok_or(InterviewError::IndexOutOfRange {
            index,
            len: self.phases.len(),
        })
    }

    /// True if `index` is the final phase.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.phases.len()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phases(&self) -> &[PhaseSpec] {
        &self.phases
    }

    /// Sum of primary-question quotas across all phases.
    pub fn total_quota(&self) -> u32 {
        self.phases.iter().map(|p| p.quota).sum()
    }
}

impl Default for PhasePlan {
    fn default() -> Self {
        DEFAULT_PLAN.clone()
    }
}

impl TryFrom<Vec<PhaseSpec>> for PhasePlan {
    type Error = InterviewError;

    fn try_from(phases: Vec<PhaseSpec>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}

impl From<PhasePlan> for Vec<PhaseSpec> {
    fn from(plan: PhasePlan) -> Self {
        plan.phases
    }
}
