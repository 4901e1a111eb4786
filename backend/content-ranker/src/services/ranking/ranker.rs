use super::{
    ContentScorer, EmbeddingLookup, InterestAggregator, RankingError, Result, EMBEDDING_DIM,
    HALF_LIFE_DAYS,
};
use crate::config::RankingConfig;
use crate::models::{ContentItem, InteractionEvent, RankedResult, MAX_POSTS};
use crate::services::embedding::EmbeddingProvider;
use chrono::{DateTime, Utc};
use ndarray::Array1;
use std::sync::Arc;
use tracing::{debug, info};

/// Ranker - 向量相似度 + 時效衰減排序
///
/// Holds no per-request state; one instance is shared by all workers.
pub struct Ranker {
    provider: Arc<dyn EmbeddingProvider>,
    aggregator: InterestAggregator,
    scorer: ContentScorer,
    dimension: usize,
}

impl Ranker {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(
            provider,
            &RankingConfig {
                half_life_days: HALF_LIFE_DAYS,
                embedding_dim: EMBEDDING_DIM,
            },
        )
    }

    pub fn with_config(provider: Arc<dyn EmbeddingProvider>, config: &RankingConfig) -> Self {
        Self {
            provider,
            aggregator: InterestAggregator::new(config.half_life_days, config.embedding_dim),
            scorer: ContentScorer::new(config.half_life_days),
            dimension: config.embedding_dim,
        }
    }

    /// Rank `content` for the user behind `interactions`, keeping the top `limit`
    pub async fn rank(
        &self,
        content: &[ContentItem],
        interactions: &[InteractionEvent],
        limit: usize,
    ) -> Result<Vec<RankedResult>> {
        self.rank_at(content, interactions, limit, Utc::now()).await
    }

    /// Same as [`Ranker::rank`] with an explicit "now" shared by every decay
    pub async fn rank_at(
        &self,
        content: &[ContentItem],
        interactions: &[InteractionEvent],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankedResult>> {
        if content.is_empty() {
            return Err(RankingError::InvalidInput(
                "at least one content item is required".to_string(),
            ));
        }
        if !(1..=MAX_POSTS).contains(&limit) {
            return Err(RankingError::InvalidInput(format!(
                "limit must be between 1 and {}, got {}",
                MAX_POSTS, limit
            )));
        }

        // 1. Embed every candidate in one batch
        let lookup = self.embed_content(content).await?;

        // 2. User interest from interactions
        let interest = self.aggregator.build(interactions, &lookup, now);

        // 3. Score each unique content id once
        let mut ranked: Vec<RankedResult> = lookup
            .iter()
            .map(|entry| RankedResult {
                content_id: entry.content_id.clone(),
                score: self.scorer.score(
                    &interest,
                    entry.embedding.view(),
                    entry.created_at.as_deref(),
                    now,
                ),
            })
            .collect();

        // 4. 按分數降序排序 (stable: ties keep first-seen input order)
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);

        info!(
            content_count = content.len(),
            unique_content = lookup.len(),
            interaction_count = interactions.len(),
            personalized = !interest.is_zero(),
            returned = ranked.len(),
            top_score = ranked.first().map(|r| r.score),
            "Ranking complete"
        );

        Ok(ranked)
    }

    async fn embed_content(&self, content: &[ContentItem]) -> Result<EmbeddingLookup> {
        let texts: Vec<String> = content.iter().map(ContentItem::embedding_text).collect();

        debug!(
            provider = self.provider.name(),
            batch_size = texts.len(),
            "Embedding content batch"
        );

        let vectors = self.provider.embed(&texts).await?;

        if vectors.len() != content.len() {
            return Err(RankingError::EmbeddingCountMismatch {
                expected: content.len(),
                actual: vectors.len(),
            });
        }

        let mut lookup = EmbeddingLookup::with_capacity(content.len());
        for (item, vector) in content.iter().zip(vectors) {
            if vector.len() != self.dimension {
                return Err(RankingError::DimensionMismatch {
                    content_id: item.id.clone(),
                    expected: self.dimension,
                    actual: vector.len(),
                });
            }
            lookup.insert(&item.id, Array1::from_vec(vector), item.created_at.clone());
        }

        Ok(lookup)
    }
}
