pub mod embedding;
pub mod ranking;

pub use embedding::{EmbeddingProvider, OpenAiEmbeddingProvider};
pub use ranking::Ranker;
