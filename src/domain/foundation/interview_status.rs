//! Interview lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle of an interview session.
///
/// Transitions are one-directional: `NotStarted -> InProgress -> Completed`.
/// An in-progress session may also be force-completed by a termination guard,
/// which is the same `InProgress -> Completed` edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl InterviewStatus {
    /// Returns true if answers may be submitted.
    pub fn accepts_answers(&self) -> bool {
        matches!(self, InterviewStatus::InProgress)
    }

    /// Returns true if the final report is available.
    pub fn is_completed(&self) -> bool {
        matches!(self, InterviewStatus::Completed)
    }
}

impl StateMachine for InterviewStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use InterviewStatus::*;
        matches!((self, target), (NotStarted, InProgress) | (InProgress, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InterviewStatus::*;
        match self {
            NotStarted => vec![InProgress],
            InProgress => vec![Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InterviewStatus::NotStarted => "not_started",
            InterviewStatus::InProgress => "in_progress",
            InterviewStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_started() {
        assert_eq!(InterviewStatus::default(), InterviewStatus::NotStarted);
    }

    #[test]
    fn forward_transitions_are_valid() {
        assert!(InterviewStatus::NotStarted.can_transition_to(&InterviewStatus::InProgress));
        assert!(InterviewStatus::InProgress.can_transition_to(&InterviewStatus::Completed));
    }

    #[test]
    fn skipping_and_reversing_are_invalid() {
        assert!(!InterviewStatus::NotStarted.can_transition_to(&InterviewStatus::Completed));
        assert!(!InterviewStatus::Completed.can_transition_to(&InterviewStatus::InProgress));
        assert!(!InterviewStatus::InProgress.can_transition_to(&InterviewStatus::NotStarted));
    }

    #[test]
    fn transition_to_returns_target_or_error() {
        assert_eq!(
            InterviewStatus::NotStarted.transition_to(InterviewStatus::InProgress),
            Ok(InterviewStatus::InProgress)
        );
        let err = InterviewStatus::Completed
            .transition_to(InterviewStatus::InProgress)
            .unwrap_err();
        assert!(err.to_string().contains("status"));
    }

    #[test]
    fn completed_is_terminal() {
        assert!(InterviewStatus::Completed.is_terminal());
        assert!(!InterviewStatus::InProgress.is_terminal());
    }

    #[test]
    fn only_in_progress_accepts_answers() {
        assert!(InterviewStatus::InProgress.accepts_answers());
        assert!(!InterviewStatus::NotStarted.accepts_answers());
        assert!(!InterviewStatus::Completed.accepts_answers());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&InterviewStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
