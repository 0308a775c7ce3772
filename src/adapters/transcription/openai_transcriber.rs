//! Speech-to-text through an OpenAI-compatible `/audio/transcriptions` endpoint.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::adapters::ai::{handle_response_status, OpenAIConfig};
use crate::ports::{AIError, AudioInput, CollaboratorError, Transcriber, Transcript};

/// Uploads audio as multipart form data and reads back `verbose_json`,
/// which carries the recording duration alongside the text.
pub struct OpenAITranscriber {
    config: OpenAIConfig,
    model: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
    #[serde(default)]
    duration: Option<f64>,
}

impl OpenAITranscriber {
    /// # Errors
    ///
    /// Returns `AIError::InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig, model: impl Into<String>) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            model: model.into(),
            client,
        })
    }

    fn transcriptions_url(&self) -> String {
        format!("{}/audio/transcriptions", self.config.base_url)
    }

    fn form(&self, audio: &AudioInput) -> Result<Form, AIError> {
        let file = Part::bytes(audio.bytes.clone())
            .file_name(audio.file_name.clone())
            .mime_str(&audio.mime_type)
            .map_err(|e| AIError::InvalidRequest(format!("Invalid audio mime type: {}", e)))?;

        Ok(Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", file))
    }

    async fn request(&self, audio: &AudioInput) -> Result<Transcript, AIError> {
        let response = self
            .client
            .post(self.transcriptions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .multipart(self.form(audio)?)
            .send()
            .await
            .map_err(|e| self.config.transport_error(e))?;

        let body: TranscriptionResponse = handle_response_status(response)
            .await?
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse transcription: {}", e)))?;

        Ok(Transcript {
            text: body.text.trim().to_string(),
            duration_secs: body.duration,
        })
    }
}

#[async_trait]
impl Transcriber for OpenAITranscriber {
    async fn transcribe(&self, audio: &AudioInput) -> Result<Transcript, CollaboratorError> {
        if audio.bytes.is_empty() {
            return Err(CollaboratorError::Rejected("audio payload is empty".to_string()));
        }
        Ok(self.request(audio).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcriber() -> OpenAITranscriber {
        OpenAITranscriber::new(
            OpenAIConfig::new("test").with_base_url("https://api.example.com/v1/"),
            "whisper-1",
        )
        .unwrap()
    }

    #[test]
    fn builds_transcription_url() {
        assert_eq!(
            transcriber().transcriptions_url(),
            "https://api.example.com/v1/audio/transcriptions"
        );
    }

    #[test]
    fn rejects_invalid_mime_type() {
        let audio = AudioInput::new(vec![1, 2, 3], "a.wav", "not a mime type");
        assert!(matches!(
            transcriber().form(&audio),
            Err(AIError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn empty_audio_is_rejected_without_request() {
        let audio = AudioInput::new(Vec::new(), "a.wav", "audio/wav");
        let err = transcriber().transcribe(&audio).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Rejected(_)));
    }

    #[test]
    fn verbose_json_duration_is_optional() {
        let parsed: TranscriptionResponse = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(parsed.duration, None);
    }
}
