//! Next-action decision and session-level termination guards.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::SessionState;
use crate::domain::foundation::Timestamp;

/// What the session does after scoring an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    FollowUp,
    NextPhase,
    Continue,
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NextAction::FollowUp => "follow_up",
            NextAction::NextPhase => "next_phase",
            NextAction::Continue => "continue",
        };
        f.write_str(s)
    }
}

/// Why a session reached `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    AllPhasesCompleted,
    QuestionCapReached,
    PoorPerformance,
    TimeLimitExceeded,
    EndedByCaller,
}

impl CompletionReason {
    /// True for completions forced before the plan ran out.
    pub fn is_early(&self) -> bool {
        !matches!(self, CompletionReason::AllPhasesCompleted)
    }
}

impl fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompletionReason::AllPhasesCompleted => "all_phases_completed",
            CompletionReason::QuestionCapReached => "question_cap_reached",
            CompletionReason::PoorPerformance => "poor_performance",
            CompletionReason::TimeLimitExceeded => "time_limit_exceeded",
            CompletionReason::EndedByCaller => "ended_by_caller",
        };
        f.write_str(s)
    }
}

/// Follow-up versus advance policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    pub min_score_to_proceed: f64,
    pub max_follow_ups: u32,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            min_score_to_proceed: 6.0,
            max_follow_ups: 2,
        }
    }
}

impl DecisionPolicy {
    /// Picks the next action for the current phase.
    ///
    /// A low score earns a follow-up until the per-phase cap is hit; only
    /// then may the quota force the phase to end.
    pub fn decide(&self, score: f64, follow_up_count: u32, primary_count: u32, quota: u32) -> NextAction {
        if score < self.min_score_to_proceed && follow_up_count < self.max_follow_ups {
            NextAction::FollowUp
        } else if primary_count >= quota {
            NextAction::NextPhase
        } else {
            NextAction::Continue
        }
    }
}

/// Session-wide limits, independent of per-phase bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminationGuard {
    /// Answered questions (primary and follow-up) that end the session.
    pub max_total_questions: usize,
    pub poor_performance_floor: f64,
    pub poor_performance_min_questions: usize,
    pub time_limit: Duration,
}

impl Default for TerminationGuard {
    fn default() -> Self {
        Self {
            max_total_questions: 10,
            poor_performance_floor: 4.0,
            poor_performance_min_questions: 5,
            time_limit: Duration::minutes(30),
        }
    }
}

impl TerminationGuard {
    /// Returns the reason the session must end now, if any.
    ///
    /// Only sessions in progress are checked. The pending, unanswered
    /// question does not count toward the question cap.
    pub fn evaluate(&self, state: &SessionState, now: Timestamp) -> Option<CompletionReason> {
        if !state.status().accepts_answers() {
            return None;
        }

        let answered = state.answers().len();
        if answered >= self.max_total_questions {
            return Some(CompletionReason::QuestionCapReached);
        }

        if answered >= self.poor_performance_min_questions
            && state.average_answer_score() < self.poor_performance_floor
        {
            return Some(CompletionReason::PoorPerformance);
        }

        if let Some(elapsed) = state.elapsed(now) {
            if elapsed > self.time_limit {
                return Some(CompletionReason::TimeLimitExceeded);
            }
        }

        None
    }
}
