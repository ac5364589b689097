//! Summarize command implementation.

use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::error::ReferatError;
use crate::openai;
use crate::store::{self, DataPaths};
use crate::summary::SummaryGenerator;
use crate::transcription::StructuredTranscript;
use anyhow::Result;

/// Generate the detailed table-of-contents summary.
pub async fn run_summarize(force: bool, settings: Settings) -> Result<()> {
    let paths = DataPaths::from_settings(&settings);
    let output_path = paths.detailed_summary();

    if output_path.exists() && !force {
        Output::info(&format!(
            "Detailed summary already exists at {}. Use --force to regenerate.",
            output_path.display()
        ));
        return Ok(());
    }

    if !openai::is_api_key_configured() {
        Output::error("OPENAI_API_KEY is not set.");
        return Err(ReferatError::Config("OPENAI_API_KEY is not set".to_string()).into());
    }

    let transcript: StructuredTranscript = store::read_json(&paths.structured_transcript())
        .map_err(|e| {
            Output::error(&format!(
                "No structured transcript at {}. Run 'referat transcribe' first.",
                paths.structured_transcript().display()
            ));
            e
        })?;

    let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
    let generator = SummaryGenerator::new(&settings.summary).with_prompts(prompts.summary);

    Output::info(&format!(
        "Summarizing {} paragraphs with {}...",
        transcript.paragraphs.len(),
        settings.summary.model
    ));

    let spinner = Output::spinner("Generating detailed summary...");
    let summary = match generator.generate(&transcript).await {
        Ok(summary) => {
            spinner.finish_and_clear();
            summary
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Summary generation failed: {}", e));
            return Err(e.into());
        }
    };

    store::write_json_pretty(&output_path, &summary)?;

    Output::success(&format!("Detailed summary saved to {}", output_path.display()));
    Output::kv("Headline", &summary.headline);
    Output::kv("Sections", &summary.sections.len().to_string());
    Output::kv(
        "Key figures",
        &summary.key_figures_mentioned.len().to_string(),
    );

    Ok(())
}
