//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Chat completion providers (OpenAI-compatible, mock)
//! - `llm` - Question, evaluation and narrative collaborators built on an AI provider
//! - `transcription` - Speech-to-text over the OpenAI audio API
//! - `storage` - In-memory session store
//! - `clock` - System and manually driven clocks
//! - `scripted` - Deterministic collaborators for tests and offline runs
//! - `http` - REST API

pub mod ai;
pub mod clock;
pub mod http;
pub mod llm;
pub mod scripted;
pub mod storage;
pub mod transcription;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use clock::{ManualClock, SystemClock};
pub use http::{app_router, InterviewHandlers};
pub use llm::{LlmAnswerEvaluator, LlmQuestionGenerator, LlmReportNarrator};
pub use scripted::{
    FailingCollaborator, HangingCollaborator, ScriptedEvaluator, ScriptedNarrator,
    ScriptedQuestionGenerator, ScriptedTranscriber,
};
pub use storage::InMemorySessionStore;
pub use transcription::OpenAITranscriber;
