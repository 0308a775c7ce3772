//! HTTP adapters - REST API implementations.
//!
//! `interview` exposes the interview endpoints; `app_router` wraps them with
//! the shared request tracing, CORS and timeout layers.

pub mod interview;

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use interview::{interview_routes, InterviewHandlers};

/// Builds the application router with cross-cutting layers applied.
///
/// An empty `cors_origins` list allows any origin.
pub fn app_router(
    handlers: InterviewHandlers,
    request_timeout: Duration,
    cors_origins: &[String],
) -> Router {
    interview_routes(handlers)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed)
    }
}
