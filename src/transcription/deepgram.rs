//! Deepgram transcription client.

use crate::config::TranscriptionSettings;
use crate::error::{ReferatError, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Pre-recorded transcription endpoint.
const LISTEN_URL: &str = "https://api.deepgram.com/v1/listen";

/// Client for the Deepgram pre-recorded transcription API.
///
/// Sends the raw media bytes and requests diarization, smart formatting,
/// entity detection, summarization, topics, and paragraphs in one call.
pub struct DeepgramTranscriber {
    client: reqwest::Client,
    api_key: String,
    model: String,
    language: String,
}

impl DeepgramTranscriber {
    /// Create a transcriber from settings, reading the API key from the
    /// `DEEPGRAM_API_KEY` environment variable.
    pub fn from_env(settings: &TranscriptionSettings) -> Result<Self> {
        let api_key = std::env::var("DEEPGRAM_API_KEY").map_err(|_| {
            ReferatError::Config(
                "DEEPGRAM_API_KEY is not set. Export it before transcribing.".to_string(),
            )
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: settings.model.clone(),
            language: settings.language.clone(),
        })
    }

    /// Transcribe a media file and return the raw response body.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn transcribe_file(&self, path: &Path) -> Result<serde_json::Value> {
        let audio = tokio::fs::read(path).await?;
        debug!("Read {} bytes of media", audio.len());
        self.transcribe(audio, content_type_for(path)).await
    }

    /// Transcribe raw media bytes and return the raw response body.
    ///
    /// The caller is expected to persist the returned value before doing any
    /// further processing with it.
    #[instrument(skip(self, audio), fields(bytes = audio.len(), model = %self.model))]
    pub async fn transcribe(&self, audio: Vec<u8>, content_type: &str) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(LISTEN_URL)
            .query(&[
                ("model", self.model.as_str()),
                ("language", self.language.as_str()),
                ("smart_format", "true"),
                ("diarize", "true"),
                ("detect_entities", "true"),
                ("summarize", "v2"),
                ("topics", "true"),
                ("paragraphs", "true"),
            ])
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Content-Type", content_type)
            .body(audio)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReferatError::Transcription(format!(
                "Deepgram API error: {} - {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

/// Content type for a media file, from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp4") => "video/mp4",
        Some("m4a") => "audio/mp4",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Check if the Deepgram API key is configured.
pub fn is_api_key_configured() -> bool {
    std::env::var("DEEPGRAM_API_KEY").is_ok_and(|k| !k.is_empty())
}
