//! Context building for grounded answers.

use crate::transcription::Paragraph;

/// Build the context window sent to the generative model.
///
/// The short summary line comes first (only when non-empty), followed by the
/// given paragraphs in the order supplied — the caller passes them in
/// descending-similarity order.
pub fn build_context(summary: &str, paragraphs: &[&Paragraph]) -> String {
    let mut parts = Vec::with_capacity(paragraphs.len() + 1);

    if !summary.is_empty() {
        parts.push(format!("Summary: {}", summary));
    }
    for paragraph in paragraphs {
        parts.push(paragraph.labeled_text());
    }

    parts.join("\n\n")
}

/// Truncate a string to at most `budget` characters.
///
/// Counts characters rather than bytes so multi-byte text never gets cut
/// mid-codepoint.
pub fn truncate_chars(text: &str, budget: usize) -> String {
    text.chars().take(budget).collect()
}
