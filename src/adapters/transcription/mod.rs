//! Transcriber adapters.

mod openai_transcriber;

pub use openai_transcriber::OpenAITranscriber;
