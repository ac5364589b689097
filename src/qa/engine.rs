//! Answer generation.

use super::{build_context, truncate_chars, QaErrorKind, QaResponse, SourceExcerpt};
use super::{MAX_SOURCES, SOURCE_CHAR_BUDGET};
use crate::config::{Prompts, QaPrompts};
use crate::embedding::Embedder;
use crate::error::{ReferatError, Result};
use crate::openai::{create_client, is_api_key_configured};
use crate::search::rank;
use crate::transcription::{Paragraph, StructuredTranscript};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// QA engine: embeds the question, ranks the precomputed corpus, and asks
/// the generative model to answer from the top-ranked excerpts.
pub struct QaEngine {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    max_context_paragraphs: usize,
    embedder: Arc<dyn Embedder>,
    prompts: QaPrompts,
}

impl QaEngine {
    /// Create a new QA engine.
    pub fn new(embedder: Arc<dyn Embedder>, model: &str, max_context_paragraphs: usize) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            max_context_paragraphs,
            embedder,
            prompts: QaPrompts::default(),
        }
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: QaPrompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Checks that need no I/O at all.
    ///
    /// Returns a ready response for a blank question or a missing credential;
    /// `None` means the question can proceed to retrieval and generation.
    pub fn preflight(question: &str) -> Option<QaResponse> {
        if question.trim().is_empty() {
            return Some(QaResponse {
                answer: "Please provide a question.".to_string(),
                sources: Vec::new(),
                error: None,
            });
        }

        if !is_api_key_configured() {
            return Some(QaResponse {
                answer: "OPENAI_API_KEY is not configured; question answering is unavailable."
                    .to_string(),
                sources: Vec::new(),
                error: Some(QaErrorKind::MissingCredential),
            });
        }

        None
    }

    /// Answer a question from the transcript and its precomputed embeddings.
    #[instrument(skip(self, transcript, embeddings), fields(question = %question))]
    pub async fn ask(
        &self,
        question: &str,
        transcript: &StructuredTranscript,
        embeddings: &[Vec<f32>],
    ) -> Result<QaResponse> {
        if let Some(early) = Self::preflight(question) {
            return Ok(early);
        }
        let question = question.trim();

        info!("Processing question: {}", question);

        // Only the question is embedded; paragraph vectors are precomputed.
        let query = self.embedder.embed(question).await?;
        let ranked = rank(&query, embeddings, self.max_context_paragraphs);

        let top: Vec<&Paragraph> = ranked
            .iter()
            .filter_map(|scored| transcript.paragraphs.get(scored.index))
            .collect();

        let context = build_context(&transcript.summary, &top);

        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context);
        vars.insert("question".to_string(), question.to_string());
        let user_prompt = Prompts::render(&self.prompts.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.system.clone())
                .build()
                .map_err(|e| ReferatError::Qa(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| ReferatError::Qa(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(1000u32)
            .build()
            .map_err(|e| ReferatError::Qa(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ReferatError::OpenAI(format!("Failed to generate answer: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_else(|| "No answer generated.".to_string());

        let sources: Vec<SourceExcerpt> = top
            .iter()
            .take(MAX_SOURCES)
            .map(|p| SourceExcerpt {
                text: truncate_chars(&p.text, SOURCE_CHAR_BUDGET),
                speaker: p.speaker,
                start: p.start,
            })
            .collect();

        debug!("Generated answer with {} sources", sources.len());

        Ok(QaResponse {
            answer,
            sources,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_blank_question() {
        for blank in ["", "   ", "\n\t"] {
            let response = QaEngine::preflight(blank).expect("blank question short-circuits");
            assert_eq!(response.answer, "Please provide a question.");
            assert!(response.sources.is_empty());
            assert!(response.error.is_none());
        }
    }
}
