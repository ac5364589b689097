//! Detailed summary generation against the generative model.

use super::DetailedSummary;
use crate::config::{Prompts, SummaryPrompts, SummarySettings};
use crate::error::{ReferatError, Result};
use crate::openai::create_client;
use crate::qa::truncate_chars;
use crate::speakers::speaker_name;
use crate::transcription::StructuredTranscript;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Generates the detailed table-of-contents summary.
pub struct SummaryGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    max_transcript_chars: usize,
    max_completion_tokens: u32,
    prompts: SummaryPrompts,
}

impl SummaryGenerator {
    /// Create a generator from settings.
    pub fn new(settings: &SummarySettings) -> Self {
        Self {
            client: create_client(),
            model: settings.model.clone(),
            max_transcript_chars: settings.max_transcript_chars,
            max_completion_tokens: settings.max_completion_tokens,
            prompts: SummaryPrompts::default(),
        }
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: SummaryPrompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Generate a detailed summary for the transcript.
    #[instrument(skip(self, transcript))]
    pub async fn generate(&self, transcript: &StructuredTranscript) -> Result<DetailedSummary> {
        let condensed = condense_transcript(transcript, self.max_transcript_chars);

        info!(
            "Summarizing {} chars across {} paragraphs with {}",
            condensed.len(),
            transcript.paragraphs.len(),
            self.model
        );

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), condensed);
        let user_prompt = Prompts::render(&self.prompts.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.system.clone())
                .build()
                .map_err(|e| ReferatError::Summary(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| ReferatError::Summary(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .max_completion_tokens(self.max_completion_tokens)
            .build()
            .map_err(|e| ReferatError::Summary(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ReferatError::OpenAI(format!("Failed to generate summary: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ReferatError::Summary("Empty response from model".to_string()))?;

        Ok(serde_json::from_str(&content)?)
    }
}

/// Render the transcript as timestamped speaker lines for the prompt.
///
/// Truncates at `max_chars` characters with an explicit marker so the model
/// knows the tail is missing.
pub fn condense_transcript(transcript: &StructuredTranscript, max_chars: usize) -> String {
    let lines: Vec<String> = transcript
        .paragraphs
        .iter()
        .map(|p| {
            format!(
                "[{}] {}: {}",
                format_clock(p.start),
                speaker_name(p.speaker),
                p.text
            )
        })
        .collect();

    let text = lines.join("\n");
    if text.chars().count() > max_chars {
        let mut truncated = truncate_chars(&text, max_chars);
        truncated.push_str("\n\n[TRANSCRIPT TRUNCATED]");
        truncated
    } else {
        text
    }
}

/// Format seconds as M:SS (minutes unpadded, matching the prompt examples).
pub fn format_clock(seconds: f64) -> String {
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::Paragraph;

    fn transcript_with(paragraphs: Vec<Paragraph>) -> StructuredTranscript {
        StructuredTranscript {
            paragraphs,
            ..Default::default()
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(65.4), "1:05");
        assert_eq!(format_clock(3600.0), "60:00");
    }

    #[test]
    fn test_condense_transcript_lines() {
        let transcript = transcript_with(vec![
            Paragraph {
                speaker: Some(1),
                start: 0.0,
                text: "Good evening.".to_string(),
                ..Default::default()
            },
            Paragraph {
                speaker: Some(0),
                start: 61.0,
                text: "Good evening to you.".to_string(),
                ..Default::default()
            },
        ]);

        let condensed = condense_transcript(&transcript, 10_000);
        assert_eq!(
            condensed,
            "[0:00] Ehud: Good evening.\n[1:01] Epstein: Good evening to you."
        );
    }

    #[test]
    fn test_condense_transcript_truncation() {
        let transcript = transcript_with(vec![Paragraph {
            speaker: Some(0),
            text: "word ".repeat(100),
            ..Default::default()
        }]);

        let condensed = condense_transcript(&transcript, 50);
        assert!(condensed.ends_with("[TRANSCRIPT TRUNCATED]"));
        assert!(condensed.chars().count() <= 50 + "\n\n[TRANSCRIPT TRUNCATED]".len());
    }
}
