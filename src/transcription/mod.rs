//! Transcription provider client and response normalization.
//!
//! The raw provider response is saved to disk as-is; `normalize` reshapes it
//! into the structured transcript the rest of the system works with.

pub mod deepgram;
pub mod models;
pub mod normalize;

pub use deepgram::DeepgramTranscriber;
pub use models::{
    Entity, Paragraph, RawTranscription, Sentence, StructuredTranscript, Topic,
    TranscriptMetadata, Word,
};
pub use normalize::normalize;
