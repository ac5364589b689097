//! Transcribe command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use crate::qa::truncate_chars;
use anyhow::Result;

/// Run the transcription pipeline.
pub async fn run_transcribe(force: bool, settings: Settings) -> Result<()> {
    let pipeline = Pipeline::new(settings)?;

    if force {
        for path in [
            pipeline.paths().raw_transcription(),
            pipeline.paths().embeddings(),
        ] {
            if path.exists() {
                std::fs::remove_file(&path)?;
                Output::info(&format!("Removed {}", path.display()));
            }
        }
    }

    let spinner = Output::spinner("Running transcription pipeline...");
    let outcome = match pipeline.run().await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            outcome
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Pipeline failed: {}", e));
            return Err(e.into());
        }
    };

    let transcript = &outcome.transcript;

    if outcome.transcription_cached {
        Output::info("Raw transcription loaded from cache.");
    } else {
        Output::success("Recording transcribed.");
    }
    match outcome.embeddings_computed {
        Some(count) => Output::success(&format!("Computed {} paragraph embeddings.", count)),
        None => Output::info("Embeddings already exist (cached)."),
    }

    Output::header("Transcript");
    Output::kv(
        "Duration",
        &format!("{:.1}s", transcript.metadata.duration),
    );
    Output::kv("Speakers", &transcript.speakers.len().to_string());
    Output::kv("Paragraphs", &transcript.paragraphs.len().to_string());
    Output::kv("Entities", &transcript.entities.len().to_string());
    Output::kv("Topics", &transcript.topics.len().to_string());

    if !transcript.summary.is_empty() {
        println!("\n{}", truncate_chars(&transcript.summary, 500));
    }

    Ok(())
}
