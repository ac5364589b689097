//! Detailed summary generation.
//!
//! A one-time pipeline step that asks a generative model for a
//! table-of-contents style summary of the whole conversation. The result is
//! saved as JSON and served verbatim by the explorer API.

mod generate;

pub use generate::{condense_transcript, format_clock, SummaryGenerator};

use serde::{Deserialize, Serialize};

/// A table-of-contents style summary of the full conversation.
///
/// All fields are lenient: a model response missing a field parses with that
/// field empty rather than failing the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedSummary {
    pub headline: String,
    pub overview: String,
    pub sections: Vec<SummarySection>,
    pub key_figures_mentioned: Vec<KeyFigure>,
    pub key_themes: Vec<String>,
}

/// One titled section of the conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySection {
    pub title: String,
    pub timestamp_start: String,
    pub timestamp_end: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub speakers_involved: Vec<String>,
}

/// A person referenced in the conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyFigure {
    pub name: String,
    pub context: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_parse() {
        let summary: DetailedSummary = serde_json::from_str(
            r#"{
                "headline": "A long conversation",
                "sections": [{"title": "Opening", "key_points": ["hello"]}]
            }"#,
        )
        .unwrap();

        assert_eq!(summary.headline, "A long conversation");
        assert_eq!(summary.overview, "");
        assert_eq!(summary.sections.len(), 1);
        assert_eq!(summary.sections[0].title, "Opening");
        assert!(summary.sections[0].speakers_involved.is_empty());
        assert!(summary.key_figures_mentioned.is_empty());
    }
}
