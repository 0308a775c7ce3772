//! Lifecycle transitions for status enums.

use super::ValidationError;

/// A status enum with a fixed set of allowed transitions.
///
/// Implementors list their edges; `transition_to` and `is_terminal` follow.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every status reachable in one step from `self`.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns `target` if the edge exists.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "status",
                format!("{:?} cannot move to {:?}", self, target),
            ))
        }
    }

    /// True when no edge leaves this status.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
