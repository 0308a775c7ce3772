//! Voice feature summary attached to spoken answers.

use serde::{Deserialize, Serialize};

/// Speech rate assumed when the analyzer did not report one.
pub const DEFAULT_SPEECH_RATE_WPM: f64 = 120.0;

/// Pause frequency assumed when the analyzer did not report one.
pub const DEFAULT_PAUSE_FREQUENCY: f64 = 0.5;

/// Raw prosody features reported alongside an answer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VoiceFeatures {
    /// Words per minute.
    #[serde(default)]
    pub speech_rate: Option<f64>,
    /// Pauses per second.
    #[serde(default)]
    pub pause_frequency: Option<f64>,
}

impl VoiceFeatures {
    pub fn new(speech_rate: f64, pause_frequency: f64) -> Self {
        Self {
            speech_rate: Some(speech_rate),
            pause_frequency: Some(pause_frequency),
        }
    }
}

/// Derived view of the voice features stored on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSummary {
    pub speech_rate: f64,
    pub pause_frequency: f64,
    /// Confidence estimate in [0, 1].
    pub confidence: f64,
}

impl VoiceSummary {
    /// Summarizes features, substituting defaults for missing values.
    ///
    /// Confidence starts at 0.5, gains 0.2 for a conversational pace
    /// (100..=150 wpm) and loses 0.1 when the pace is rushed (> 180) or
    /// halting (< 80).
    pub fn from_features(features: &VoiceFeatures) -> Self {
        let speech_rate = features
            .speech_rate
            .filter(|r| r.is_finite())
            .unwrap_or(DEFAULT_SPEECH_RATE_WPM);
        let pause_frequency = features
            .pause_frequency
            .filter(|p| p.is_finite())
            .unwrap_or(DEFAULT_PAUSE_FREQUENCY);

        let mut confidence: f64 = 0.5;
        if (100.0..=150.0).contains(&speech_rate) {
            confidence += 0.2;
        }
        if !(80.0..=180.0).contains(&speech_rate) {
            confidence -= 0.1;
        }

        Self {
            speech_rate,
            pause_frequency,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}
