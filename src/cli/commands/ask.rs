//! Ask command implementation.

use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::embedding::OpenAIEmbedder;
use crate::qa::QaEngine;
use crate::speakers::speaker_name;
use crate::store::{self, DataPaths};
use crate::summary::format_clock;
use crate::transcription::StructuredTranscript;
use anyhow::Result;
use std::sync::Arc;

/// Run the ask command.
pub async fn run_ask(question: &str, model: Option<String>, settings: Settings) -> Result<()> {
    // Blank questions and missing credentials are answered without loading
    // anything.
    if let Some(early) = QaEngine::preflight(question) {
        println!("{}", early.answer);
        return Ok(());
    }

    let paths = DataPaths::from_settings(&settings);

    let transcript: StructuredTranscript = store::read_json(&paths.structured_transcript())
        .map_err(|e| {
            Output::error(&format!(
                "No structured transcript at {}. Run 'referat transcribe' first.",
                paths.structured_transcript().display()
            ));
            e
        })?;

    let embeddings: Vec<Vec<f32>> = store::read_json(&paths.embeddings()).map_err(|e| {
        Output::error(&format!(
            "No embeddings at {}. Run 'referat transcribe' first.",
            paths.embeddings().display()
        ));
        e
    })?;

    let model = model.unwrap_or_else(|| settings.qa.model.clone());

    let embedder = Arc::new(OpenAIEmbedder::with_config(
        &settings.embedding.model,
        settings.embedding.dimensions as usize,
        settings.embedding.batch_size,
    ));

    let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
    let engine = QaEngine::new(embedder, &model, settings.qa.max_context_paragraphs)
        .with_prompts(prompts.qa);

    let spinner = Output::spinner("Searching transcript...");

    match engine.ask(question, &transcript, &embeddings).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.answer);

            if !response.sources.is_empty() {
                Output::header("Sources");
                for source in &response.sources {
                    Output::excerpt(
                        speaker_name(source.speaker),
                        &format_clock(source.start),
                        &source.text,
                    );
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
