//! HTTP handlers for interview endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::engine::InterviewEngine;
use crate::application::handlers::{
    EndInterviewCommand, EndInterviewHandler, GetInterviewHandler, GetInterviewQuery,
    GetReportHandler, GetReportQuery, InterviewCommandError, StartInterviewCommand,
    StartInterviewHandler, SubmitAnswerCommand, SubmitAnswerHandler, SubmitAudioAnswerCommand,
    SubmitAudioAnswerHandler,
};
use crate::domain::foundation::{ErrorCode, InterviewId};
use crate::domain::interview::PhasePlan;
use crate::ports::{AudioInput, SessionStore};

use super::dto::{
    ErrorResponse, HealthResponse, InterviewStateResponse, StartInterviewRequest,
    StartInterviewResponse, SubmitAnswerRequest, TurnResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InterviewHandlers {
    start_handler: Arc<StartInterviewHandler>,
    answer_handler: Arc<SubmitAnswerHandler>,
    audio_handler: Arc<SubmitAudioAnswerHandler>,
    get_handler: Arc<GetInterviewHandler>,
    report_handler: Arc<GetReportHandler>,
    end_handler: Arc<EndInterviewHandler>,
    store: Arc<dyn SessionStore>,
}

impl InterviewHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_handler: Arc<StartInterviewHandler>,
        answer_handler: Arc<SubmitAnswerHandler>,
        audio_handler: Arc<SubmitAudioAnswerHandler>,
        get_handler: Arc<GetInterviewHandler>,
        report_handler: Arc<GetReportHandler>,
        end_handler: Arc<EndInterviewHandler>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            start_handler,
            answer_handler,
            audio_handler,
            get_handler,
            report_handler,
            end_handler,
            store,
        }
    }

    /// Builds every handler around one engine and store.
    pub fn from_engine(
        engine: Arc<InterviewEngine>,
        store: Arc<dyn SessionStore>,
        default_plan: PhasePlan,
    ) -> Self {
        Self::new(
            Arc::new(StartInterviewHandler::new(engine.clone(), store.clone(), default_plan)),
            Arc::new(SubmitAnswerHandler::new(engine.clone(), store.clone())),
            Arc::new(SubmitAudioAnswerHandler::new(engine.clone(), store.clone())),
            Arc::new(GetInterviewHandler::new(store.clone())),
            Arc::new(GetReportHandler::new(engine.clone(), store.clone())),
            Arc::new(EndInterviewHandler::new(engine, store.clone())),
            store,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /interviews - Start an interview and return the first question
pub async fn start_interview(
    State(handlers): State<InterviewHandlers>,
    Json(req): Json<StartInterviewRequest>,
) -> Response {
    let plan = match req.phase_plan.map(PhasePlan::new).transpose() {
        Ok(plan) => plan,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    let cmd = StartInterviewCommand {
        job_description: req.job_description,
        candidate: req.candidate,
        plan,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response: StartInterviewResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// POST /interviews/:id/answers - Submit a text answer
pub async fn submit_answer(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Response {
    let interview_id = match parse_id(&interview_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitAnswerCommand {
        interview_id,
        answer: req.answer,
        voice: req.voice,
    };

    match handlers.answer_handler.handle(cmd).await {
        Ok(outcome) => {
            let response: TurnResponse = outcome.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// POST /interviews/:id/audio-answers - Submit a recorded answer as the raw body
pub async fn submit_audio_answer(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let interview_id = match parse_id(&interview_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if body.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Audio body is empty")),
        )
            .into_response();
    }

    let mime_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("audio/wav")
        .to_string();
    let extension = mime_type
        .rsplit('/')
        .next()
        .filter(|ext| !ext.is_empty())
        .unwrap_or("wav");

    let cmd = SubmitAudioAnswerCommand {
        interview_id,
        audio: AudioInput::new(body.to_vec(), format!("answer.{}", extension), mime_type.as_str()),
        voice: None,
    };

    match handlers.audio_handler.handle(cmd).await {
        Ok(outcome) => {
            let response: TurnResponse = outcome.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// GET /interviews/:id - Current state of an interview
pub async fn get_interview(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
) -> Response {
    let interview_id = match parse_id(&interview_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetInterviewQuery { interview_id }).await {
        Ok(view) => {
            let response: InterviewStateResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// GET /interviews/:id/report - Final report of a completed interview
pub async fn get_report(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
) -> Response {
    let interview_id = match parse_id(&interview_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.report_handler.handle(GetReportQuery { interview_id }).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// DELETE /interviews/:id - End an interview early and drop it
pub async fn end_interview(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
) -> Response {
    let interview_id = match parse_id(&interview_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = EndInterviewCommand {
        interview_id,
        evict: true,
    };

    match handlers.end_handler.handle(cmd).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// GET /health - Liveness plus the number of live sessions
pub async fn health(State(handlers): State<InterviewHandlers>) -> Response {
    let response = HealthResponse {
        status: "ok".to_string(),
        live_sessions: handlers.store.len().await,
    };
    (StatusCode::OK, Json(response)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_id(raw: &str) -> Result<InterviewId, Response> {
    raw.parse::<InterviewId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid interview ID")),
        )
            .into_response()
    })
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::InvalidScoreRange => StatusCode::BAD_REQUEST,
        ErrorCode::InterviewNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition | ErrorCode::NoActiveQuestion | ErrorCode::AlreadyExists => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn handle_interview_error(error: InterviewCommandError) -> Response {
    let code = error.code();
    let status = status_for(code);
    if status.is_server_error() {
        tracing::error!(error = %error, "Interview request failed");
    }
    (status, Json(ErrorResponse::new(code.to_string(), error.to_string()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_error_category() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::InvalidScoreRange), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::InterviewNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::InvalidStateTransition), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::NoActiveQuestion), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::IndexOutOfRange), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id(&InterviewId::new().to_string()).is_ok());
    }
}
