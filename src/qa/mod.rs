//! Question answering over the precomputed transcript corpus.
//!
//! Answers are grounded: the model only sees the short summary and the
//! top-ranked paragraphs for the question, and is instructed to disclose
//! when the answer is not present in them.

pub mod context;
mod engine;

pub use context::{build_context, truncate_chars};
pub use engine::QaEngine;

use serde::{Deserialize, Serialize};

/// Maximum number of source excerpts returned with an answer.
pub const MAX_SOURCES: usize = 5;

/// Character budget for each source excerpt.
pub const SOURCE_CHAR_BUDGET: usize = 300;

/// A transcript excerpt cited as a source for an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceExcerpt {
    /// Paragraph text, truncated to the excerpt character budget.
    pub text: String,
    pub speaker: Option<u32>,
    /// Start timestamp in seconds, for UI citation.
    pub start: f64,
}

/// Machine-readable reason an answer could not be generated.
///
/// Kept separate from the human-readable answer text so callers can
/// distinguish "service unavailable" from "not found in the transcript".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QaErrorKind {
    MissingCredential,
}

/// An answer with its cited sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaResponse {
    pub answer: String,
    pub sources: Vec<SourceExcerpt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<QaErrorKind>,
}
