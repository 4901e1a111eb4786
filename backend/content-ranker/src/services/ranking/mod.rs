/// Ranking Module
///
/// Scores a request-scoped batch of content items against the requesting
/// user's recent interactions.
///
/// # Workflow
/// 1. Embed every candidate with one batched provider call
/// 2. Aggregate weighted, decayed interaction embeddings into an interest vector
/// 3. Score each unique candidate by cosine similarity with recency decay
/// 4. Sort descending and truncate to the requested limit
pub mod interest;
pub mod lookup;
pub mod ranker;
pub mod scorer;

pub use interest::{InterestAggregator, InterestVector};
pub use lookup::EmbeddingLookup;
pub use ranker::Ranker;
pub use scorer::ContentScorer;

use crate::services::embedding::EmbeddingError;
use thiserror::Error;

/// Half-life for both interaction and content recency decay
pub const HALF_LIFE_DAYS: f64 = 3.0;

/// Dimension of `text-embedding-ada-002` vectors
pub const EMBEDDING_DIM: usize = 1536;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error("Embedding provider returned {actual} vectors for {expected} inputs")]
    EmbeddingCountMismatch { expected: usize, actual: usize },

    #[error("Embedding for {content_id} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        content_id: String,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, RankingError>;
