//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `QuestionGenerator` - Primary and follow-up question text
//! - `AnswerEvaluator` - Per-dimension answer scoring
//! - `Transcriber` - Speech to text
//! - `ReportNarrator` - Prose summary for the final report
//!
//! Every collaborator call may fail with `CollaboratorError`; the engine
//! recovers with fixed fallbacks.
//!
//! ## Infrastructure Ports
//!
//! - `AIProvider` - LLM completions the collaborator adapters are built on
//! - `SessionStore` - Registry of live sessions
//! - `Clock` - Current time

mod ai_provider;
mod answer_evaluator;
mod clock;
mod collaborator;
mod question_generator;
mod report_narrator;
mod session_store;
mod transcriber;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use answer_evaluator::{AnswerEvaluator, EvaluationRequest};
pub use clock::Clock;
pub use collaborator::{CollaboratorError, CollaboratorKind};
pub use question_generator::{FollowUpRequest, QuestionGenerator, QuestionRequest};
pub use report_narrator::{NarrativeRequest, ReportNarrator};
pub use session_store::{SessionStore, SharedSession, StoreError};
pub use transcriber::{AudioInput, Transcriber, Transcript};
