//! Ledger of fail-open substitutions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// External collaborator the session depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorKind {
    QuestionGenerator,
    AnswerEvaluator,
    Transcriber,
    ReportNarrator,
}

impl fmt::Display for CollaboratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CollaboratorKind::QuestionGenerator => "question_generator",
            CollaboratorKind::AnswerEvaluator => "answer_evaluator",
            CollaboratorKind::Transcriber => "transcriber",
            CollaboratorKind::ReportNarrator => "report_narrator",
        };
        f.write_str(s)
    }
}

/// One recorded degradation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRecord {
    pub collaborator: CollaboratorKind,
    pub reason: String,
    pub occurred_at: Timestamp,
}
