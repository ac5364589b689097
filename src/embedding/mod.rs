//! Embedding generation for semantic search.

mod openai;

pub use openai::OpenAIEmbedder;

use crate::error::Result;
use crate::transcription::Paragraph;
use async_trait::async_trait;

/// Trait for embedding generation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, one vector per input, in
    /// input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}

/// Embed a list of paragraphs, one vector per paragraph.
///
/// Paragraphs are rendered with their speaker label before embedding, and the
/// returned vectors are positionally aligned with the input: index i of the
/// result corresponds to paragraph i.
pub async fn embed_paragraphs(
    embedder: &dyn Embedder,
    paragraphs: &[Paragraph],
) -> Result<Vec<Vec<f32>>> {
    let texts: Vec<String> = paragraphs.iter().map(|p| p.labeled_text()).collect();
    embedder.embed_batch(&texts).await
}
