//! Results returned by engine operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::interview::{Answer, InterviewReport, NextAction, Question, VoiceFeatures};

/// Action tag reported to the caller after each answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnAction {
    FollowUp,
    Continue,
    NextPhase,
    Complete,
}

impl From<NextAction> for TurnAction {
    fn from(action: NextAction) -> Self {
        match action {
            NextAction::FollowUp => TurnAction::FollowUp,
            NextAction::Continue => TurnAction::Continue,
            NextAction::NextPhase => TurnAction::NextPhase,
        }
    }
}

impl fmt::Display for TurnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TurnAction::FollowUp => "follow_up",
            TurnAction::Continue => "continue",
            TurnAction::NextPhase => "next_phase",
            TurnAction::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// A text answer as submitted by the candidate.
#[derive(Debug, Clone, Default)]
pub struct AnswerSubmission {
    pub text: String,
    pub voice: Option<VoiceFeatures>,
}

impl AnswerSubmission {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
        }
    }

    pub fn with_voice(mut self, voice: VoiceFeatures) -> Self {
        self.voice = Some(voice);
        self
    }
}

/// What happened after an answer was submitted.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub action: TurnAction,
    /// The scored answer. `None` when a termination guard ended the
    /// session before the answer could be recorded.
    pub answer: Option<Answer>,
    /// Question now awaiting an answer; `None` once complete.
    pub next_question: Option<Question>,
    /// Final report; present only with `TurnAction::Complete`.
    pub report: Option<InterviewReport>,
    pub phases_completed: usize,
    pub total_phases: usize,
    /// Ordinal of `next_question` within the session, starting at 1.
    pub question_number: usize,
}

impl TurnOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self.action, TurnAction::Complete)
    }
}
