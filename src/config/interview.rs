//! Interview engine configuration

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use super::error::{ConfigError, ValidationError};

/// Longest allowed interview: one day.
pub const MAX_TIME_LIMIT_MINUTES: u64 = 24 * 60;

/// Longest a finished or abandoned session may linger: one week.
pub const MAX_SESSION_IDLE_TTL_MINUTES: u64 = 7 * 24 * 60;

pub const MAX_COLLABORATOR_TIMEOUT_SECS: u64 = 300;
use crate::application::engine::EngineSettings;
use crate::domain::interview::{
    DecisionPolicy, InterviewPhase, PhasePlan, PhaseWeights, TerminationGuard,
    DEFAULT_PHASE_WEIGHT,
};

/// Interview engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewConfig {
    /// Answers scoring below this earn a follow-up
    #[serde(default = "default_min_score_to_proceed")]
    pub min_score_to_proceed: f64,

    /// Follow-ups allowed per phase
    #[serde(default = "default_max_follow_ups")]
    pub max_follow_ups: u32,

    /// Answered questions that end the session
    #[serde(default = "default_max_total_questions")]
    pub max_total_questions: usize,

    /// Running average below which a struggling session ends
    #[serde(default = "default_poor_performance_floor")]
    pub poor_performance_floor: f64,

    /// Answers required before the performance floor applies
    #[serde(default = "default_poor_performance_min_questions")]
    pub poor_performance_min_questions: usize,

    #[serde(default = "default_time_limit_minutes")]
    pub time_limit_minutes: u64,

    /// Characters of each answer kept in generation history
    #[serde(default = "default_history_preview_chars")]
    pub history_preview_chars: usize,

    /// Upper bound on a single collaborator call
    #[serde(default = "default_collaborator_timeout_secs")]
    pub collaborator_timeout_secs: u64,

    /// Idle time after which a session is evicted
    #[serde(default = "default_session_idle_ttl_minutes")]
    pub session_idle_ttl_minutes: u64,

    /// Optional YAML file holding the phase plan
    pub phase_plan_path: Option<PathBuf>,

    /// Per-phase weight overrides
    #[serde(default)]
    pub phase_weights: BTreeMap<InterviewPhase, f64>,

    /// Weight for phases without an entry
    #[serde(default = "default_phase_weight")]
    pub default_phase_weight: f64,
}

impl InterviewConfig {
    /// Validate interview configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_threshold("min_score_to_proceed", self.min_score_to_proceed)?;
        check_threshold("poor_performance_floor", self.poor_performance_floor)?;

        if self.max_total_questions == 0 {
            return Err(ValidationError::NonPositiveLimit("max_total_questions"));
        }
        check_limit("time_limit_minutes", self.time_limit_minutes, MAX_TIME_LIMIT_MINUTES)?;
        check_limit(
            "collaborator_timeout_secs",
            self.collaborator_timeout_secs,
            MAX_COLLABORATOR_TIMEOUT_SECS,
        )?;
        check_limit(
            "session_idle_ttl_minutes",
            self.session_idle_ttl_minutes,
            MAX_SESSION_IDLE_TTL_MINUTES,
        )?;
        if !is_positive_weight(self.default_phase_weight) {
            return Err(ValidationError::InvalidPhaseWeight("default".to_string()));
        }
        if let Some((phase, _)) = self.phase_weights.iter().find(|(_, w)| !is_positive_weight(**w)) {
            return Err(ValidationError::InvalidPhaseWeight(phase.to_string()));
        }
        Ok(())
    }

    /// Idle TTL, capped at `MAX_SESSION_IDLE_TTL_MINUTES`.
    pub fn session_idle_ttl(&self) -> chrono::Duration {
        minutes_capped(self.session_idle_ttl_minutes, MAX_SESSION_IDLE_TTL_MINUTES)
    }

    /// Phase weights: built-in table, then configured overrides.
    pub fn phase_weights(&self) -> PhaseWeights {
        self.phase_weights.iter().fold(
            PhaseWeights::default().with_default_weight(self.default_phase_weight),
            |weights, (phase, weight)| weights.with_weight(*phase, *weight),
        )
    }

    /// Loads the configured phase plan, or the built-in six-phase plan.
    pub fn phase_plan(&self) -> Result<PhasePlan, ConfigError> {
        match &self.phase_plan_path {
            Some(path) => {
                PhasePlan::from_yaml_file(path).map_err(|e| ConfigError::PhasePlan(e.to_string()))
            }
            None => Ok(PhasePlan::default()),
        }
    }

    /// Engine settings derived from this configuration.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            policy: DecisionPolicy {
                min_score_to_proceed: self.min_score_to_proceed,
                max_follow_ups: self.max_follow_ups,
            },
            guard: TerminationGuard {
                max_total_questions: self.max_total_questions,
                poor_performance_floor: self.poor_performance_floor,
                poor_performance_min_questions: self.poor_performance_min_questions,
                time_limit: minutes_capped(self.time_limit_minutes, MAX_TIME_LIMIT_MINUTES),
            },
            weights: self.phase_weights(),
            history_preview_chars: self.history_preview_chars,
            collaborator_timeout: Duration::from_secs(self.collaborator_timeout_secs),
        }
    }
}

fn minutes_capped(minutes: u64, max: u64) -> chrono::Duration {
    let minutes = i64::try_from(minutes.min(max)).unwrap_or(i64::MAX);
    chrono::Duration::try_minutes(minutes).unwrap_or_else(chrono::Duration::zero)
}

fn check_limit(name: &'static str, value: u64, max: u64) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::NonPositiveLimit(name));
    }
    if value > max {
        return Err(ValidationError::LimitTooLarge { name, max });
    }
    Ok(())
}

fn is_positive_weight(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=10.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::ThresholdOutOfRange(name))
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            min_score_to_proceed: default_min_score_to_proceed(),
            max_follow_ups: default_max_follow_ups(),
            max_total_questions: default_max_total_questions(),
            poor_performance_floor: default_poor_performance_floor(),
            poor_performance_min_questions: default_poor_performance_min_questions(),
            time_limit_minutes: default_time_limit_minutes(),
            history_preview_chars: default_history_preview_chars(),
            collaborator_timeout_secs: default_collaborator_timeout_secs(),
            session_idle_ttl_minutes: default_session_idle_ttl_minutes(),
            phase_plan_path: None,
            phase_weights: BTreeMap::new(),
            default_phase_weight: default_phase_weight(),
        }
    }
}

fn default_min_score_to_proceed() -> f64 {
    6.0
}

fn default_max_follow_ups() -> u32 {
    2
}

fn default_max_total_questions() -> usize {
    10
}

fn default_poor_performance_floor() -> f64 {
    4.0
}

fn default_poor_performance_min_questions() -> usize {
    5
}

fn default_time_limit_minutes() -> u64 {
    30
}

fn default_history_preview_chars() -> usize {
    100
}

fn default_collaborator_timeout_secs() -> u64 {
    30
}

fn default_session_idle_ttl_minutes() -> u64 {
    60
}

fn default_phase_weight() -> f64 {
    DEFAULT_PHASE_WEIGHT
}
