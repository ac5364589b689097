//! Normalization of a raw transcription response into the structured form.

use super::models::{
    Paragraph, RawAlternative, RawTranscription, StructuredTranscript, TranscriptMetadata, Word,
};
use crate::error::{ReferatError, Result};
use tracing::debug;

/// Reshape a raw transcription response into a [`StructuredTranscript`].
///
/// Every optional section (paragraphs, words, entities, summary, topics)
/// defaults to an empty collection when absent. A response with no primary
/// channel or alternative is malformed and fails.
pub fn normalize(raw: RawTranscription) -> Result<StructuredTranscript> {
    let channel = raw
        .results
        .channels
        .into_iter()
        .next()
        .ok_or_else(|| ReferatError::Transcription("response has no audio channel".to_string()))?;

    let RawAlternative {
        transcript,
        words,
        paragraphs,
    } = channel.alternatives.into_iter().next().ok_or_else(|| {
        ReferatError::Transcription("response has no transcription alternative".to_string())
    })?;

    let paragraphs: Vec<Paragraph> = paragraphs
        .map(|section| section.paragraphs)
        .unwrap_or_default()
        .into_iter()
        .map(|p| {
            let text = p
                .sentences
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            Paragraph {
                speaker: p.speaker,
                start: p.start,
                end: p.end,
                num_words: p.num_words,
                text,
                sentences: p.sentences,
            }
        })
        .collect();

    let words: Vec<Word> = words
        .into_iter()
        .map(|w| Word {
            punctuated_word: w.punctuated_word.unwrap_or_else(|| w.word.clone()),
            word: w.word,
            start: w.start,
            end: w.end,
            confidence: w.confidence,
            speaker: w.speaker,
        })
        .collect();

    let entities = raw
        .results
        .entities
        .map(|section| section.entities)
        .unwrap_or_default();

    let summary = raw
        .results
        .summary
        .map(|section| section.short)
        .unwrap_or_default();

    let topics: Vec<_> = raw
        .results
        .topics
        .map(|section| section.segments)
        .unwrap_or_default()
        .into_iter()
        .flat_map(|segment| {
            let (start, end) = (segment.start_word, segment.end_word);
            segment.topics.into_iter().map(move |t| super::Topic {
                topic: t.topic,
                confidence: t.confidence,
                start,
                end,
            })
        })
        .collect();

    let mut speakers: Vec<u32> = paragraphs.iter().filter_map(|p| p.speaker).collect();
    speakers.sort_unstable();
    speakers.dedup();

    debug!(
        "Normalized transcript: {} paragraphs, {} words, {} entities, {} topics",
        paragraphs.len(),
        words.len(),
        entities.len(),
        topics.len()
    );

    Ok(StructuredTranscript {
        metadata: TranscriptMetadata {
            duration: raw.metadata.duration,
            channels: raw.metadata.channels,
            model: raw.metadata.model_info,
        },
        summary,
        topics,
        entities,
        speakers,
        paragraphs,
        words,
        full_transcript: transcript,
    })
}
