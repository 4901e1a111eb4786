// ============================================
// Embedding Provider (內容向量提供者)
// ============================================
//
// Turns content text into fixed-dimension embedding vectors.
// The ranker makes exactly one batched call per request; failures are
// surfaced to the caller, never retried or defaulted.

pub mod openai;

pub use openai::OpenAiEmbeddingProvider;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding request failed: {0}")]
    Request(String),

    #[error("Embedding service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse embedding response: {0}")]
    Parse(String),

    #[error("Malformed embedding response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, returning one vector per input in input order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get provider name
    fn name(&self) -> &'static str;
}
