//! Mock AI Provider for testing and offline runs.
//!
//! Returns queued responses in order. Once the queue is empty it answers
//! with a canned reply suited to the request's operation, so the LLM-backed
//! collaborators keep producing parseable output during local development.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response(r#"{"question": "Why Rust?"}"#)
//!     .with_delay(Duration::from_millis(100));
//!
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::adapters::llm::operations;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Mock AI provider.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success {
        content: String,
        finish_reason: FinishReason,
    },
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1", 128000).with_json_mode(true),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success {
            content: content.into(),
            finish_reason: FinishReason::Stop,
        });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn next_response(&self, operation: &str) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: canned_reply(operation).to_string(),
                finish_reason: FinishReason::Stop,
            })
    }
}

/// Plausible offline output for each collaborator operation.
fn canned_reply(operation: &str) -> &'static str {
    match operation {
        operations::QUESTION_GENERATION => {
            r#"{"question": "Walk me through a system you designed recently and the trade-offs you made.", "expected_skills": ["system design", "communication"], "evaluation_criteria": ["clarity of trade-offs", "depth of reasoning"]}"#
        }
        operations::FOLLOW_UP_GENERATION => {
            r#"{"follow_up_question": "Can you give a concrete example of that from your own work?"}"#
        }
        operations::ANSWER_EVALUATION => {
            r#"{"scores": {"relevance": 7, "completeness": 6, "depth": 6, "clarity": 7, "specificity": 6}, "strengths": ["Relevant to the question"], "weaknesses": ["Could use more specifics"], "detailed_feedback": "A reasonable answer; add concrete examples.", "follow_up_suggestions": ["Ask for a specific example"]}"#
        }
        operations::REPORT_NARRATIVE => {
            "The candidate communicated clearly and showed a reasonable grasp of the role's fundamentals."
        }
        _ => "Mock response",
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let operation = request.metadata.operation;
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response(operation) {
            MockResponse::Success {
                content,
                finish_reason,
            } => Ok(CompletionResponse {
                content,
                usage: TokenUsage::new(10, 20),
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::InterviewId;
    use crate::ports::{MessageRole, RequestMetadata};

    fn request(operation: &'static str) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(InterviewId::new(), operation))
            .with_message(MessageRole::User, "Hello")
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let provider = MockAIProvider::new().with_response("First").with_response("Second");

        let r1 = provider.complete(request("test")).await.unwrap();
        let r2 = provider.complete(request("test")).await.unwrap();

        assert_eq!(r1.content, "First");
        assert_eq!(r2.content, "Second");
        assert_eq!(r1.model, "mock-model-1");
    }

    #[tokio::test]
    async fn falls_back_to_canned_reply_per_operation() {
        let provider = MockAIProvider::new();

        let eval = provider
            .complete(request(operations::ANSWER_EVALUATION))
            .await
            .unwrap();
        assert!(eval.content.contains("\"scores\""));

        let other = provider.complete(request("unknown")).await.unwrap();
        assert_eq!(other.content, "Mock response");
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider = MockAIProvider::new().with_error(MockError::RateLimited { retry_after_secs: 30 });

        let err = provider.complete(request("test")).await.unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockAIProvider::new();
        assert_eq!(provider.call_count(), 0);

        provider.complete(request(operations::REPORT_NARRATIVE)).await.unwrap();
        assert_eq!(provider.call_count(), 1);
        assert_eq!(
            provider.get_calls()[0].metadata.operation,
            operations::REPORT_NARRATIVE
        );
    }

    #[tokio::test]
    async fn respects_delay() {
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(30));

        let start = std::time::Instant::now();
        provider.complete(request("test")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
