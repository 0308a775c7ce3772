//! Integration tests for interview HTTP endpoints.
//!
//! Exercises the full router, tower-http layers included, with scripted
//! collaborators behind the engine.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use interview_engine::adapters::{
    app_router, HangingCollaborator, InMemorySessionStore, InterviewHandlers, ScriptedEvaluator,
    ScriptedNarrator, ScriptedQuestionGenerator, ScriptedTranscriber, SystemClock,
};
use interview_engine::application::{Collaborators, EngineSettings, InterviewEngine};
use interview_engine::domain::interview::PhasePlan;
use interview_engine::ports::{SessionStore, Transcript};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(score: f64) -> Router {
    let collaborators = Collaborators {
        questions: Arc::new(ScriptedQuestionGenerator::new()),
        evaluator: Arc::new(ScriptedEvaluator::scoring(score)),
        transcriber: Arc::new(ScriptedTranscriber::new(Transcript {
            text: "I rewrote the ingest path".to_string(),
            duration_secs: Some(2.0),
        })),
        narrator: Arc::new(ScriptedNarrator::default()),
    };
    app_with(collaborators, EngineSettings::default(), Duration::from_secs(5))
}

fn app_with(collaborators: Collaborators, settings: EngineSettings, request_timeout: Duration) -> Router {
    let clock = Arc::new(SystemClock);
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(clock.clone()));
    let engine = Arc::new(InterviewEngine::new(collaborators, clock, settings));
    let handlers = InterviewHandlers::from_engine(engine, store, PhasePlan::default());
    app_router(handlers, request_timeout, &[])
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn start_body() -> Value {
    json!({
        "job_description": "Senior Rust engineer for a streaming platform",
        "candidate": {
            "name": "Ada Lovelace",
            "years_experience": 6,
            "skills": ["rust", "kafka"],
            "target_position": "Senior Backend Engineer"
        }
    })
}

async fn start(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/interviews", Some(start_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["interview_id"].as_str().unwrap().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_reports_live_sessions() {
    let app = app(7.0);
    start(&app).await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["live_sessions"], 1);
}

#[tokio::test]
async fn start_returns_first_question() {
    let app = app(7.0);

    let (status, body) = send(&app, Method::POST, "/interviews", Some(start_body())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["total_phases"], 6);
    assert_eq!(body["question"]["phase"], "introduction");
    assert_eq!(body["question"]["question_number"], 1);
    assert_eq!(body["question"]["is_follow_up"], false);
}

#[tokio::test]
async fn start_with_custom_plan() {
    let app = app(8.0);
    let mut req = start_body();
    req["phase_plan"] = json!([{"phase": "technical", "difficulty": "hard", "quota": 1}]);

    let (status, body) = send(&app, Method::POST, "/interviews", Some(req)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_phases"], 1);

    let id = body["interview_id"].as_str().unwrap();
    let (status, turn) = send(
        &app,
        Method::POST,
        &format!("/interviews/{}/answers", id),
        Some(json!({"answer": "Ownership and borrowing"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(turn["action"], "complete");
    assert_eq!(turn["phase_progress"], "1/1");
    assert_eq!(turn["report"]["completion_reason"], "all_phases_completed");
    assert!(turn.get("next_question").is_none());
}

#[tokio::test]
async fn start_rejects_empty_plan() {
    let app = app(7.0);
    let mut req = start_body();
    req["phase_plan"] = json!([]);

    let (status, body) = send(&app, Method::POST, "/interviews", Some(req)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn start_rejects_invalid_candidate() {
    let app = app(7.0);
    let mut req = start_body();
    req["candidate"]["name"] = json!("");

    let (status, body) = send(&app, Method::POST, "/interviews", Some(req)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn answer_returns_feedback_and_next_question() {
    let app = app(7.0);
    let id = start(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/interviews/{}/answers", id),
        Some(json!({"answer": "I build data pipelines", "voice": {"speech_rate": 130.0}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "next_phase");
    assert_eq!(body["previous_score"], 7.0);
    assert_eq!(body["phase_progress"], "1/6");
    assert_eq!(body["next_question"]["phase"], "technical");
    assert_eq!(body["next_question"]["question_number"], 2);
}

#[tokio::test]
async fn low_score_answer_gets_follow_up() {
    let app = app(3.0);
    let id = start(&app).await;

    let (_, body) = send(
        &app,
        Method::POST,
        &format!("/interviews/{}/answers", id),
        Some(json!({"answer": "Not sure"})),
    )
    .await;

    assert_eq!(body["action"], "follow_up");
    assert_eq!(body["next_question"]["is_follow_up"], true);
}

#[tokio::test]
async fn audio_answer_is_transcribed() {
    let app = app(7.0);
    let id = start(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(format!("/interviews/{}/audio-answers", id))
                .header(header::CONTENT_TYPE, "audio/webm")
                .body(Body::from(vec![0u8; 64]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let (_, state) = send(&app, Method::GET, &format!("/interviews/{}", id), None).await;
    assert_eq!(state["answers_given"], 1);
}

#[tokio::test]
async fn empty_audio_is_rejected() {
    let app = app(7.0);
    let id = start(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(format!("/interviews/{}/audio-answers", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn state_reflects_progress() {
    let app = app(7.0);
    let id = start(&app).await;
    send(
        &app,
        Method::POST,
        &format!("/interviews/{}/answers", id),
        Some(json!({"answer": "Hello"})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, &format!("/interviews/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["candidate_name"], "Ada Lovelace");
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["current_phase"], "technical");
    assert_eq!(body["current_difficulty"], "medium");
    assert_eq!(body["questions_asked"], 2);
    assert_eq!(body["answers_given"], 1);
    assert_eq!(body["pending_question"]["question_number"], 2);
}

#[tokio::test]
async fn report_before_completion_conflicts() {
    let app = app(7.0);
    let id = start(&app).await;

    let (status, body) = send(&app, Method::GET, &format!("/interviews/{}/report", id), None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE_TRANSITION");
}

#[tokio::test]
async fn delete_ends_and_evicts() {
    let app = app(7.0);
    let id = start(&app).await;

    let (status, report) = send(&app, Method::DELETE, &format!("/interviews/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["completion_reason"], "ended_by_caller");

    let (status, body) = send(&app, Method::GET, &format!("/interviews/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "INTERVIEW_NOT_FOUND");
}

#[tokio::test]
async fn delete_after_completion_returns_report_and_evicts() {
    let app = app(8.0);
    let mut req = start_body();
    req["phase_plan"] = json!([{"phase": "introduction", "difficulty": "easy", "quota": 1}]);
    let (_, body) = send(&app, Method::POST, "/interviews", Some(req)).await;
    let id = body["interview_id"].as_str().unwrap().to_string();
    let (_, turn) = send(
        &app,
        Method::POST,
        &format!("/interviews/{}/answers", id),
        Some(json!({"answer": "Hello"})),
    )
    .await;
    assert_eq!(turn["action"], "complete");

    let (status, report) = send(&app, Method::DELETE, &format!("/interviews/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report, turn["report"]);
    let (status, _) = send(&app, Method::GET, &format!("/interviews/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn timed_out_request_still_finishes_the_turn() {
    // Evaluation then generation takes about 300ms, past the 200ms request limit
    let settings = EngineSettings {
        collaborator_timeout: Duration::from_millis(150),
        ..EngineSettings::default()
    };
    let app = app_with(
        Collaborators {
            questions: Arc::new(HangingCollaborator),
            evaluator: Arc::new(HangingCollaborator),
            transcriber: Arc::new(ScriptedTranscriber::default()),
            narrator: Arc::new(ScriptedNarrator::default()),
        },
        settings,
        Duration::from_millis(200),
    );
    let id = start(&app).await;
    let answer_uri = format!("/interviews/{}/answers", id);
    let state_uri = format!("/interviews/{}", id);

    let (status, _) = send(&app, Method::POST, &answer_uri, Some(json!({"answer": "Slow"}))).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

    let mut state = Value::Null;
    for _ in 0..40 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let (_, body) = send(&app, Method::GET, &state_uri, None).await;
        state = body;
        if state["questions_asked"] == 2 {
            break;
        }
    }
    assert_eq!(state["status"], "in_progress");
    assert_eq!(state["answers_given"], 1);
    assert_eq!(state["questions_asked"], 2);
    assert!(state["pending_question"].is_object());

    // The session keeps accepting answers
    let (status, body) = send(&app, Method::POST, &answer_uri, Some(json!({"answer": "Again"}))).await;
    assert_ne!(body["code"], "NO_ACTIVE_QUESTION");
    assert!(status == StatusCode::OK || status == StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn invalid_and_unknown_ids() {
    let app = app(7.0);

    let (status, body) = send(&app, Method::GET, "/interviews/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid interview ID");

    let unknown = uuid::Uuid::new_v4();
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/interviews/{}/answers", unknown),
        Some(json!({"answer": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
