//! Pipeline coordination.
//!
//! Runs the one-time build: transcribe, normalize, embed. Each stage persists
//! its artifact before the next stage runs, so a later-stage failure never
//! forces re-fetching the expensive upstream transcription.

use crate::config::Settings;
use crate::embedding::{embed_paragraphs, Embedder, OpenAIEmbedder};
use crate::error::{ReferatError, Result};
use crate::store::{self, DataPaths};
use crate::transcription::{normalize, DeepgramTranscriber, StructuredTranscript};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The pipeline build coordinator.
pub struct Pipeline {
    settings: Settings,
    paths: DataPaths,
    embedder: Arc<dyn Embedder>,
}

/// What a pipeline run produced.
pub struct PipelineOutcome {
    pub transcript: StructuredTranscript,
    /// Whether the raw transcription came from the on-disk cache.
    pub transcription_cached: bool,
    /// Number of vectors computed this run; `None` when already on disk.
    pub embeddings_computed: Option<usize>,
}

impl Pipeline {
    /// Create a pipeline with the default OpenAI embedder.
    pub fn new(settings: Settings) -> Result<Self> {
        let embedder = Arc::new(OpenAIEmbedder::with_config(
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
            settings.embedding.batch_size,
        ));
        Ok(Self::with_embedder(settings, embedder))
    }

    /// Create a pipeline with a custom embedder.
    pub fn with_embedder(settings: Settings, embedder: Arc<dyn Embedder>) -> Self {
        let paths = DataPaths::from_settings(&settings);
        Self {
            settings,
            paths,
            embedder,
        }
    }

    /// Get the artifact paths this pipeline reads and writes.
    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Run all stages. Failures are fatal; nothing partial is persisted
    /// beyond the artifacts already written by completed stages.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<PipelineOutcome> {
        let (raw, transcription_cached) = self.load_or_transcribe().await?;

        let transcript = normalize(serde_json::from_value(raw)?)?;
        store::write_json_pretty(&self.paths.structured_transcript(), &transcript)?;
        info!(
            "Structured transcript saved to {}",
            self.paths.structured_transcript().display()
        );

        let embeddings_computed = if self.paths.embeddings().exists() {
            info!(
                "Embeddings already exist at {} (cached)",
                self.paths.embeddings().display()
            );
            None
        } else {
            Some(self.compute_embeddings(&transcript).await?)
        };

        Ok(PipelineOutcome {
            transcript,
            transcription_cached,
            embeddings_computed,
        })
    }

    /// Reuse the cached raw transcription, or fetch one from the provider.
    ///
    /// A corrupt cache file is deleted and re-fetched. A fresh response is
    /// saved to disk immediately, before any further processing.
    async fn load_or_transcribe(&self) -> Result<(serde_json::Value, bool)> {
        let raw_path = self.paths.raw_transcription();

        if raw_path.exists() {
            match store::read_json::<serde_json::Value>(&raw_path) {
                Ok(raw) => {
                    info!(
                        "Raw transcription loaded from {} (cached)",
                        raw_path.display()
                    );
                    return Ok((raw, true));
                }
                Err(e) => {
                    warn!("Existing raw transcription is corrupt ({}), re-transcribing", e);
                    std::fs::remove_file(&raw_path)?;
                }
            }
        }

        let audio = self.paths.audio();
        if !audio.exists() {
            return Err(ReferatError::NotFound(format!(
                "Recording not found: {}",
                audio.display()
            )));
        }

        let transcriber = DeepgramTranscriber::from_env(&self.settings.transcription)?;
        let raw = transcriber.transcribe_file(&audio).await?;

        store::write_json_pretty(&raw_path, &raw)?;
        info!("Raw transcription saved to {}", raw_path.display());

        Ok((raw, false))
    }

    /// Embed every paragraph and persist the vectors.
    async fn compute_embeddings(&self, transcript: &StructuredTranscript) -> Result<usize> {
        info!(
            "Computing embeddings for {} paragraphs ({})",
            transcript.paragraphs.len(),
            self.settings.embedding.model
        );

        let embeddings = embed_paragraphs(self.embedder.as_ref(), &transcript.paragraphs).await?;

        // One vector per paragraph, positionally aligned. A mismatch would
        // silently misattribute vectors at query time, so it fails the run.
        if embeddings.len() != transcript.paragraphs.len() {
            return Err(ReferatError::Embedding(format!(
                "expected {} vectors, got {}",
                transcript.paragraphs.len(),
                embeddings.len()
            )));
        }

        store::write_json_compact(&self.paths.embeddings(), &embeddings)?;
        info!("Embeddings saved to {}", self.paths.embeddings().display());

        Ok(embeddings.len())
    }
}
