//! CLI module for Referat.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Referat - Transcript Pipeline and Explorer
///
/// Transcribes a diarized recording, precomputes embeddings for semantic
/// search, and serves the results through a small HTTP API.
/// The name "Referat" comes from the Scandinavian word for a written record
/// of a meeting.
#[derive(Parser, Debug)]
#[command(name = "referat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline: transcribe, normalize, and embed the recording
    Transcribe {
        /// Discard cached transcription and embeddings and re-process
        #[arg(short, long)]
        force: bool,
    },

    /// Generate the detailed table-of-contents summary
    Summarize {
        /// Regenerate even if the summary file already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Ask a question about the transcript
    Ask {
        /// The question to ask
        question: String,

        /// LLM model to use for answer generation
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Keyword search over transcript paragraphs
    Search {
        /// Search term (case-insensitive substring)
        query: String,

        /// Only match paragraphs from this speaker ID
        #[arg(short, long)]
        speaker: Option<u32>,
    },

    /// Start the explorer HTTP API
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Check configuration, credentials, and pipeline artifacts
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
