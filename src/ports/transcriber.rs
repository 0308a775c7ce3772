//! Transcriber Port - speech to text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::collaborator::CollaboratorError;

/// An uploaded audio answer.
#[derive(Debug, Clone)]
pub struct AudioInput {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl AudioInput {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Result of transcription.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    /// Length of the recording, when the transcriber reports it.
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration_secs: None,
        }
    }

    /// Words per minute, if the duration is known and positive.
    pub fn speech_rate(&self) -> Option<f64> {
        let secs = self.duration_secs.filter(|d| d.is_finite() && *d > 0.0)?;
        let words = self.text.split_whitespace().count() as f64;
        Some(words * 60.0 / secs)
    }
}

/// Port for speech-to-text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &AudioInput) -> Result<Transcript, CollaboratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_rate_from_duration() {
        let t = Transcript {
            text: "one two three four five six".to_string(),
            duration_secs: Some(3.0),
        };
        assert_eq!(t.speech_rate(), Some(120.0));
    }

    #[test]
    fn speech_rate_needs_positive_duration() {
        assert_eq!(Transcript::new("hello there").speech_rate(), None);
        let zero = Transcript {
            text: "hello".to_string(),
            duration_secs: Some(0.0),
        };
        assert_eq!(zero.speech_rate(), None);
    }
}
