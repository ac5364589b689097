//! Search command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::search::{keyword_search, KEYWORD_RESULT_CAP};
use crate::speakers::speaker_name;
use crate::store::{self, DataPaths};
use crate::summary::format_clock;
use crate::transcription::StructuredTranscript;
use anyhow::Result;

/// Run the keyword search command.
pub fn run_search(query: &str, speaker: Option<u32>, settings: Settings) -> Result<()> {
    let paths = DataPaths::from_settings(&settings);

    let transcript: StructuredTranscript = store::read_json(&paths.structured_transcript())
        .map_err(|e| {
            Output::error(&format!(
                "No structured transcript at {}. Run 'referat transcribe' first.",
                paths.structured_transcript().display()
            ));
            e
        })?;

    let results = keyword_search(&transcript.paragraphs, query, speaker, KEYWORD_RESULT_CAP);

    if results.is_empty() {
        Output::info("No matching paragraphs.");
        return Ok(());
    }

    Output::success(&format!("{} matching paragraph(s):", results.len()));
    for hit in &results {
        Output::excerpt(
            speaker_name(hit.paragraph.speaker),
            &format_clock(hit.paragraph.start),
            &hit.paragraph.text,
        );
    }

    Ok(())
}
