//! Data models for transcription.

use serde::{Deserialize, Serialize};

// ============================================================================
// Raw Provider Response Types
// ============================================================================
//
// Lenient serde types for the Deepgram response. Every optional section
// defaults to empty; only the primary channel/alternative is required, and
// that requirement is enforced by the normalizer rather than the parser.

/// Root of a raw Deepgram transcription response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTranscription {
    #[serde(default)]
    pub metadata: RawMetadata,
    pub results: RawResults,
}

/// Request-level metadata from the provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub duration: f64,
    #[serde(default = "default_channel_count")]
    pub channels: u32,
    #[serde(default = "empty_object")]
    pub model_info: serde_json::Value,
}

impl Default for RawMetadata {
    fn default() -> Self {
        Self {
            duration: 0.0,
            channels: default_channel_count(),
            model_info: empty_object(),
        }
    }
}

fn default_channel_count() -> u32 {
    1
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawResults {
    #[serde(default)]
    pub channels: Vec<RawChannel>,
    #[serde(default)]
    pub entities: Option<RawEntitySection>,
    #[serde(default)]
    pub summary: Option<RawSummarySection>,
    #[serde(default)]
    pub topics: Option<RawTopicSection>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawChannel {
    #[serde(default)]
    pub alternatives: Vec<RawAlternative>,
}

/// One alternative transcription of a channel.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub words: Vec<RawWord>,
    #[serde(default)]
    pub paragraphs: Option<RawParagraphSection>,
}

/// A single word with diarization info.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawWord {
    pub word: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    #[serde(default)]
    pub confidence: f64,
    /// Numeric speaker identifier; absent when diarization found none.
    #[serde(default)]
    pub speaker: Option<u32>,
    #[serde(default)]
    pub punctuated_word: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawParagraphSection {
    #[serde(default)]
    pub paragraphs: Vec<RawParagraph>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawParagraph {
    #[serde(default)]
    pub speaker: Option<u32>,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    #[serde(default)]
    pub num_words: u32,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawEntitySection {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawSummarySection {
    #[serde(default)]
    pub short: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTopicSection {
    #[serde(default)]
    pub segments: Vec<RawTopicSegment>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTopicSegment {
    #[serde(default)]
    pub topics: Vec<RawTopicItem>,
    #[serde(default)]
    pub start_word: u32,
    #[serde(default)]
    pub end_word: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTopicItem {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub confidence: f64,
}

// ============================================================================
// Structured Transcript Types
// ============================================================================

/// A diarized, timestamped unit of speech attributed to one speaker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    pub speaker: Option<u32>,
    pub start: f64,
    pub end: f64,
    pub num_words: u32,
    /// Sentence texts joined with single spaces.
    pub text: String,
    pub sentences: Vec<Sentence>,
}

impl Paragraph {
    /// Render the paragraph as `"[<speaker name>] <text>"`.
    ///
    /// This is the form used both for embedding input and for the QA context
    /// window, so speaker identity is part of the semantic signal.
    pub fn labeled_text(&self) -> String {
        format!("[{}] {}", crate::speakers::speaker_name(self.speaker), self.text)
    }
}

/// A single sentence within a paragraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sentence {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// A single transcribed word with timing and confidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Word {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
    pub speaker: Option<u32>,
    /// Punctuated form; falls back to the bare word when absent upstream.
    pub punctuated_word: String,
}

/// A detected entity, with word indices into the flattened word sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Entity {
    pub label: String,
    pub value: String,
    pub confidence: f64,
    pub start_word: u32,
    pub end_word: u32,
}

/// A detected topic, with word indices into the flattened word sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Topic {
    pub topic: String,
    pub confidence: f64,
    pub start: u32,
    pub end: u32,
}

/// Recording-level metadata carried over from the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptMetadata {
    pub duration: f64,
    pub channels: u32,
    pub model: serde_json::Value,
}

impl Default for TranscriptMetadata {
    fn default() -> Self {
        Self {
            duration: 0.0,
            channels: 1,
            model: empty_object(),
        }
    }
}

/// The normalized transcript: everything the explorer API serves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredTranscript {
    pub metadata: TranscriptMetadata,
    /// Short summary from the provider; empty when not requested/available.
    pub summary: String,
    pub topics: Vec<Topic>,
    pub entities: Vec<Entity>,
    /// Unique speaker IDs, sorted ascending; absent speakers excluded.
    pub speakers: Vec<u32>,
    pub paragraphs: Vec<Paragraph>,
    pub words: Vec<Word>,
    pub full_transcript: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_response() {
        let json = r#"{
            "metadata": {"duration": 12.5, "channels": 1, "model_info": {"name": "nova-3"}},
            "results": {
                "channels": [{
                    "alternatives": [{
                        "transcript": "hello world",
                        "words": [
                            {"word": "hello", "start": 0.5, "end": 0.8, "confidence": 0.95, "speaker": 0, "punctuated_word": "Hello"},
                            {"word": "world", "start": 0.9, "end": 1.2, "confidence": 0.92, "speaker": 1}
                        ]
                    }]
                }]
            }
        }"#;

        let raw: RawTranscription = serde_json::from_str(json).unwrap();
        assert_eq!(raw.metadata.duration, 12.5);

        let alternative = &raw.results.channels[0].alternatives[0];
        assert_eq!(alternative.transcript, "hello world");
        assert_eq!(alternative.words.len(), 2);
        assert_eq!(alternative.words[0].punctuated_word.as_deref(), Some("Hello"));
        assert_eq!(alternative.words[1].punctuated_word, None);
        assert_eq!(alternative.words[1].speaker, Some(1));
        assert!(alternative.paragraphs.is_none());
        assert!(raw.results.entities.is_none());
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let json = r#"{"results": {"channels": []}}"#;
        let raw: RawTranscription = serde_json::from_str(json).unwrap();

        assert_eq!(raw.metadata.duration, 0.0);
        assert_eq!(raw.metadata.channels, 1);
        assert!(raw.metadata.model_info.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_labeled_text() {
        let p = Paragraph {
            speaker: Some(0),
            text: "I was there.".to_string(),
            ..Default::default()
        };
        assert_eq!(p.labeled_text(), "[Epstein] I was there.");

        let anon = Paragraph {
            text: "Hm.".to_string(),
            ..Default::default()
        };
        assert_eq!(anon.labeled_text(), "[Unknown] Hm.");
    }

    #[test]
    fn test_structured_transcript_roundtrip() {
        let transcript = StructuredTranscript {
            summary: "A short chat.".to_string(),
            speakers: vec![0, 1],
            full_transcript: "hello world".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&transcript).unwrap();
        let parsed: StructuredTranscript = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.summary, "A short chat.");
        assert_eq!(parsed.speakers, vec![0, 1]);
        assert_eq!(parsed.metadata.channels, 1);
    }
}
