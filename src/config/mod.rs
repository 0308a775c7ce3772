//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `INTERVIEW_ENGINE`
//! prefix and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use interview_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().expect("Invalid host"));
//! ```

mod ai;
mod error;
mod interview;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use interview::InterviewConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Collaborator calls one answer can trigger in sequence.
const COLLABORATOR_CALLS_PER_TURN: u64 = 3;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (OpenAI-compatible endpoint)
    #[serde(default)]
    pub ai: AiConfig,

    /// Interview thresholds, limits and phase plan
    #[serde(default)]
    pub interview: InterviewConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `INTERVIEW_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `INTERVIEW_ENGINE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `INTERVIEW_ENGINE__INTERVIEW__MAX_FOLLOW_UPS=1` -> `interview.max_follow_ups = 1`
    /// - `INTERVIEW_ENGINE__INTERVIEW__PHASE_WEIGHTS__TECHNICAL=0.7`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("INTERVIEW_ENGINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.interview.validate()?;

        // A turn can chain transcription or evaluation, generation and narration
        let required_secs = self
            .interview
            .collaborator_timeout_secs
            .saturating_mul(COLLABORATOR_CALLS_PER_TURN);
        if self.server.request_timeout_secs < required_secs {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                required_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "INTERVIEW_ENGINE__AI__API_KEY",
        "INTERVIEW_ENGINE__AI__USE_MOCK_PROVIDER",
        "INTERVIEW_ENGINE__SERVER__PORT",
        "INTERVIEW_ENGINE__SERVER__ENVIRONMENT",
        "INTERVIEW_ENGINE__SERVER__LOG_FORMAT",
        "INTERVIEW_ENGINE__INTERVIEW__MAX_FOLLOW_UPS",
        "INTERVIEW_ENGINE__INTERVIEW__MIN_SCORE_TO_PROCEED",
        "INTERVIEW_ENGINE__SERVER__REQUEST_TIMEOUT_SECS",
        "INTERVIEW_ENGINE__INTERVIEW__COLLABORATOR_TIMEOUT_SECS",
        "INTERVIEW_ENGINE__INTERVIEW__TIME_LIMIT_MINUTES",
    ];

    fn set_minimal_env() {
        env::set_var("INTERVIEW_ENGINE__AI__API_KEY", "sk-test");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.ai.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.interview.max_total_questions, 10);
        assert!(!config.ai.has_api_key());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mock_provider_validates_without_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("INTERVIEW_ENGINE__AI__USE_MOCK_PROVIDER", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.use_mock_provider);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("INTERVIEW_ENGINE__SERVER__PORT", "3000");
        env::set_var("INTERVIEW_ENGINE__SERVER__ENVIRONMENT", "production");
        env::set_var("INTERVIEW_ENGINE__SERVER__LOG_FORMAT", "json");
        env::set_var("INTERVIEW_ENGINE__INTERVIEW__MAX_FOLLOW_UPS", "1");
        env::set_var("INTERVIEW_ENGINE__INTERVIEW__MIN_SCORE_TO_PROCEED", "7.5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.interview.max_follow_ups, 1);
        assert_eq!(config.interview.min_score_to_proceed, 7.5);
    }

    #[test]
    fn test_request_timeout_must_cover_a_full_turn() {
        let mut config = AppConfig::default();
        config.ai.use_mock_provider = true;
        config.server.request_timeout_secs = 60;
        config.interview.collaborator_timeout_secs = 30;

        assert!(matches!(
            config.validate(),
            Err(ValidationError::RequestTimeoutTooShort {
                request_secs: 60,
                required_secs: 90
            })
        ));

        config.server.request_timeout_secs = 90;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_timeouts_are_consistent() {
        let mut config = AppConfig::default();
        config.ai.use_mock_provider = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_time_limit_is_rejected_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("INTERVIEW_ENGINE__AI__USE_MOCK_PROVIDER", "true");
        env::set_var("INTERVIEW_ENGINE__INTERVIEW__TIME_LIMIT_MINUTES", "1000000000000000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::LimitTooLarge { name: "time_limit_minutes", .. })
        ));
    }
}
