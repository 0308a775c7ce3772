//! Interview engine HTTP server.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use interview_engine::adapters::{
    app_router, InMemorySessionStore, InterviewHandlers, LlmAnswerEvaluator,
    LlmQuestionGenerator, LlmReportNarrator, MockAIProvider, OpenAIProvider, OpenAITranscriber,
    ScriptedTranscriber, SystemClock,
};
use interview_engine::application::{Collaborators, InterviewEngine};
use interview_engine::config::{AppConfig, LogFormat, ServerConfig};
use interview_engine::ports::{AIProvider, Clock, SessionStore, Transcriber, Transcript};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let plan = config.interview.phase_plan()?;
    let settings = config.interview.engine_settings();

    let (provider, transcriber): (Arc<dyn AIProvider>, Arc<dyn Transcriber>) =
        match config.ai.openai_config().filter(|_| !config.ai.use_mock_provider) {
            Some(openai) => {
                info!(model = %openai.model, base_url = %openai.base_url, "Using OpenAI-compatible provider");
                let transcriber =
                    OpenAITranscriber::new(openai.clone(), config.ai.transcription_model.clone())?;
                (Arc::new(OpenAIProvider::new(openai)?), Arc::new(transcriber))
            }
            None => {
                warn!("Using mock AI provider; questions and scores are canned");
                (
                    Arc::new(MockAIProvider::new()),
                    Arc::new(ScriptedTranscriber::new(Transcript::new(
                        "Transcription is unavailable in offline mode.",
                    ))),
                )
            }
        };

    let collaborators = Collaborators {
        questions: Arc::new(LlmQuestionGenerator::new(provider.clone())),
        evaluator: Arc::new(LlmAnswerEvaluator::new(provider.clone())),
        transcriber,
        narrator: Arc::new(LlmReportNarrator::new(provider)),
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(clock.clone()));
    let engine = Arc::new(InterviewEngine::new(collaborators, clock.clone(), settings));

    spawn_idle_eviction(store.clone(), clock, config.interview.session_idle_ttl());

    let handlers = InterviewHandlers::from_engine(engine, store, plan);
    let app = app_router(
        handlers,
        config.server.request_timeout(),
        &config.server.cors_origins_list(),
    );

    let addr = config.server.socket_addr()?;
    info!(%addr, environment = ?config.server.environment, "Starting interview engine");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.log_format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Periodically drops sessions that have been idle longer than `ttl`.
fn spawn_idle_eviction(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>, ttl: chrono::Duration) {
    let period = ttl
        .to_std()
        .map(|d| d / 4)
        .unwrap_or(std::time::Duration::from_secs(60))
        .max(std::time::Duration::from_secs(1));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = store.evict_idle(ttl, clock.now()).await;
            if evicted > 0 {
                info!(evicted, "Evicted idle interview sessions");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
