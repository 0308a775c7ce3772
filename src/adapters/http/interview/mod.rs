//! HTTP adapter for interview endpoints.
//!
//! - `POST /interviews` - Start an interview
//! - `POST /interviews/:id/answers` - Submit a text answer
//! - `POST /interviews/:id/audio-answers` - Submit a recorded answer
//! - `GET /interviews/:id` - Interview state
//! - `GET /interviews/:id/report` - Final report
//! - `DELETE /interviews/:id` - End early and evict
//! - `GET /health` - Liveness

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, HealthResponse, InterviewStateResponse, QuestionResponse,
    StartInterviewRequest, StartInterviewResponse, SubmitAnswerRequest, TurnResponse,
};
pub use handlers::InterviewHandlers;
pub use routes::interview_routes;
