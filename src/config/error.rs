//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Phase plan could not be loaded: {0}")]
    PhasePlan(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid host address '{0}': expected an IP address")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request timeout of {request_secs}s is shorter than {required_secs}s needed for one interview turn")]
    RequestTimeoutTooShort { request_secs: u64, required_secs: u64 },

    #[error("Limit '{name}' must be at most {max}")]
    LimitTooLarge { name: &'static str, max: u64 },

    #[error("Invalid AI base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Threshold '{0}' must be between 0 and 10")]
    ThresholdOutOfRange(&'static str),

    #[error("Limit '{0}' must be positive")]
    NonPositiveLimit(&'static str),

    #[error("Phase weight for '{0}' must be positive")]
    InvalidPhaseWeight(String),
}
