use super::{EmbeddingError, EmbeddingProvider, Result};
use crate::config::EmbeddingConfig;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// OpenAI-compatible `/embeddings` client
pub struct OpenAiEmbeddingProvider {
    client: HttpClient,
    api_key: String,
    base_url: String,
    model: String,
    dimension: usize,
}

impl OpenAiEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimension: config.dimension,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url)
    }
}

#[derive(Serialize)]
struct OpenAiEmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
}

#[derive(Deserialize)]
struct OpenAiEmbeddingData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = OpenAiEmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        debug!(
            model = %self.model,
            input_count = texts.len(),
            "Requesting embeddings"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Embedding API error: {}", body);
            return Err(EmbeddingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result: OpenAiEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Parse(e.to_string()))?;

        order_embeddings(result.data, texts.len(), self.dimension)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Put response rows back in input order and check count and dimension.
fn order_embeddings(
    mut data: Vec<OpenAiEmbeddingData>,
    expected: usize,
    dimension: usize,
) -> Result<Vec<Vec<f32>>> {
    if data.len() != expected {
        return Err(EmbeddingError::Malformed(format!(
            "expected {} embeddings, got {}",
            expected,
            data.len()
        )));
    }

    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
        if data
            .iter()
            .enumerate()
            .any(|(position, d)| d.index != Some(position))
        {
            return Err(EmbeddingError::Malformed(
                "embedding indices do not cover the input batch".to_string(),
            ));
        }
    }

    data.into_iter()
        .map(|d| {
            if d.embedding.len() != dimension {
                return Err(EmbeddingError::Malformed(format!(
                    "expected dimension {}, got {}",
                    dimension,
                    d.embedding.len()
                )));
            }
            Ok(d.embedding)
        })
        .collect()
}
