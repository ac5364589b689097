//! Configuration module for Referat.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, QaPrompts, SummaryPrompts};
pub use settings::{
    EmbeddingSettings, GeneralSettings, PromptSettings, QaSettings, Settings, SummarySettings,
    TranscriptionSettings,
};
