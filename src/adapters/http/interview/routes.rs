//! HTTP routes for interview endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    end_interview, get_interview, get_report, health, start_interview, submit_answer,
    submit_audio_answer, InterviewHandlers,
};

/// Creates the interview router with all endpoints.
pub fn interview_routes(handlers: InterviewHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/interviews", post(start_interview))
        .route("/interviews/:id", get(get_interview).delete(end_interview))
        .route("/interviews/:id/answers", post(submit_answer))
        .route("/interviews/:id/audio-answers", post(submit_audio_answer))
        .route("/interviews/:id/report", get(get_report))
        .with_state(handlers)
}
