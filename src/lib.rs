//! Referat - Transcript Pipeline and Explorer
//!
//! A CLI tool that transcribes a diarized recording, precomputes text
//! embeddings for semantic search, and serves the results through a small
//! HTTP API with grounded question answering.
//!
//! The name "Referat" comes from the Scandinavian word for a written record
//! of a meeting.
//!
//! # Overview
//!
//! Referat allows you to:
//! - Transcribe a recording with diarization, entities, topics, and a summary
//! - Precompute one embedding per paragraph for semantic search
//! - Generate a detailed table-of-contents summary of the conversation
//! - Explore the transcript and ask questions over a JSON API
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management and prompt templates
//! - `speakers` - Speaker ID to display name mapping
//! - `transcription` - Transcription provider client and normalization
//! - `embedding` - Embedding generation
//! - `search` - Linear semantic search and keyword filtering
//! - `qa` - Question answering over the precomputed corpus
//! - `summary` - Detailed summary generation
//! - `store` - Flat-file JSON artifacts
//! - `pipeline` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use referat::config::Settings;
//! use referat::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     let outcome = pipeline.run().await?;
//!     println!("{} paragraphs indexed", outcome.transcript.paragraphs.len());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod pipeline;
pub mod qa;
pub mod search;
pub mod speakers;
pub mod store;
pub mod summary;
pub mod transcription;

pub use error::{ReferatError, Result};
