// ============================================
// Interest Aggregator (用戶興趣向量)
// ============================================
//
// interest = MEAN(embedding * feedback_weight * 0.5^(days_ago / half_life))
//
// Feedback weights:
// - Share: 5
// - Like: 3
// - Comment: 2
// - View / unknown: 1
//
// The mean (not the sum) keeps the magnitude independent of how active a
// user is, so similarities stay comparable across users.
//
// Accumulation runs in f64 with each decay factor capped at f32::MAX, so
// far-future interaction timestamps cannot overflow into inf/NaN. A mean
// beyond f32 range is rescaled; only its direction reaches the cosine.

use super::EmbeddingLookup;
use crate::models::InteractionEvent;
use crate::utils::{half_life_decay, SECONDS_PER_DAY};
use chrono::{DateTime, Utc};
use ndarray::{Array1, ArrayView1};
use tracing::debug;

/// Upper bound for one interaction's decay factor
const MAX_DECAY: f64 = f32::MAX as f64;

/// Aggregated user interest; all zeros means "no personalization available"
#[derive(Debug, Clone, PartialEq)]
pub struct InterestVector(Array1<f32>);

impl InterestVector {
    pub fn zeros(dimension: usize) -> Self {
        Self(Array1::zeros(dimension))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0.0)
    }

    pub fn view(&self) -> ArrayView1<'_, f32> {
        self.0.view()
    }
}

pub struct InterestAggregator {
    half_life_days: f64,
    dimension: usize,
}

impl InterestAggregator {
    pub fn new(half_life_days: f64, dimension: usize) -> Self {
        Self {
            half_life_days,
            dimension,
        }
    }

    /// Build the interest vector from interactions on the request's content.
    ///
    /// Interactions referencing content outside `lookup` are skipped.
    pub fn build(
        &self,
        interactions: &[InteractionEvent],
        lookup: &EmbeddingLookup,
        now: DateTime<Utc>,
    ) -> InterestVector {
        if interactions.is_empty() || lookup.is_empty() {
            return InterestVector::zeros(self.dimension);
        }

        let now_secs = now.timestamp_millis() as f64 / 1000.0;

        let mut accumulated = Array1::<f64>::zeros(self.dimension);
        let mut used = 0usize;
        let mut dangling = 0usize;
        let mut capped = 0usize;

        for interaction in interactions {
            let Some(embedding) = lookup.get(&interaction.content_id) else {
                dangling += 1;
                continue;
            };

            let weight = interaction.feedback().weight();
            let age_days = (now_secs - interaction.timestamp as f64) / SECONDS_PER_DAY;
            let decay = half_life_decay(age_days, self.half_life_days);
            if decay > MAX_DECAY {
                capped += 1;
            }

            accumulated.scaled_add(weight * decay.min(MAX_DECAY), &embedding.mapv(f64::from));
            used += 1;
        }

        debug!(
            used_interactions = used,
            dangling_interactions = dangling,
            capped_decays = capped,
            "Aggregated interest vector"
        );

        if used == 0 {
            return InterestVector::zeros(self.dimension);
        }

        accumulated /= used as f64;

        let peak = accumulated.iter().fold(0.0_f64, |peak, x| peak.max(x.abs()));
        if peak > MAX_DECAY {
            debug!(peak, "Interest vector exceeds f32 range, rescaling");
            accumulated /= peak;
        }

        InterestVector(accumulated.mapv(|x| x as f32))
    }
}
