/// Content Scoring Module
///
/// score = cosine(interest, candidate) * 0.5^(age_days / half_life)
///
/// Recency decay only applies when the candidate carries a parseable
/// `created_at`; missing or malformed timestamps leave the similarity as is,
/// and so does a timestamp so far ahead that the decay factor overflows.
use super::InterestVector;
use crate::utils::{cosine_similarity, days_between, half_life_decay, parse_created_at};
use chrono::{DateTime, Utc};
use ndarray::ArrayView1;
use tracing::debug;

pub struct ContentScorer {
    half_life_days: f64,
}

impl ContentScorer {
    pub fn new(half_life_days: f64) -> Self {
        Self { half_life_days }
    }

    /// Score a single candidate against the user's interest vector
    pub fn score(
        &self,
        interest: &InterestVector,
        embedding: ArrayView1<f32>,
        created_at: Option<&str>,
        now: DateTime<Utc>,
    ) -> f64 {
        // No personalization signal: the score is defined as exactly zero
        if interest.is_zero() {
            return 0.0;
        }

        cosine_similarity(interest.view(), embedding) * self.recency_factor(created_at, now)
    }

    /// Decay factor for the item's age, 1.0 when the age is unknown
    pub fn recency_factor(&self, created_at: Option<&str>, now: DateTime<Utc>) -> f64 {
        let Some(raw) = created_at.filter(|raw| !raw.is_empty()) else {
            return 1.0;
        };

        match parse_created_at(raw) {
            Ok(created) => {
                let factor = half_life_decay(days_between(created, now), self.half_life_days);
                if factor.is_finite() {
                    factor
                } else {
                    debug!(created_at = raw, "Decay factor overflowed, skipping decay");
                    1.0
                }
            }
            Err(e) => {
                debug!(created_at = raw, error = %e, "Unparseable created_at, skipping decay");
                1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InteractionEvent;
    use crate::services::ranking::{EmbeddingLookup, InterestAggregator};
    use chrono::{Duration, TimeZone};
    use ndarray::arr1;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn format(ts: DateTime<Utc>) -> String {
        ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    fn interest() -> InterestVector {
        let mut lookup = EmbeddingLookup::default();
        lookup.insert("seed", arr1(&[1.0, 1.0, 0.0]), None);
        let event = InteractionEvent {
            content_id: "seed".to_string(),
            kind: "LIKE".to_string(),
            timestamp: now().timestamp(),
        };
        InterestAggregator::new(3.0, 3).build(&[event], &lookup, now())
    }

    #[test]
    fn test_zero_interest_scores_zero() {
        let scorer = ContentScorer::new(3.0);
        let zero = InterestVector::zeros(3);
        let candidate = arr1(&[0.2_f32, 0.4, 0.1]);

        assert_eq!(scorer.score(&zero, candidate.view(), None, now()), 0.0);

        let created = format(now() - Duration::days(2));
        assert_eq!(
            scorer.score(&zero, candidate.view(), Some(created.as_str()), now()),
            0.0
        );
    }

    #[test]
    fn test_no_timestamp_is_raw_similarity() {
        let scorer = ContentScorer::new(3.0);
        let candidate = arr1(&[1.0_f32, 1.0, 0.0]);
        let score = scorer.score(&interest(), candidate.view(), None, now());
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ten_day_old_item_is_decayed() {
        let scorer = ContentScorer::new(3.0);
        let candidate = arr1(&[1.0_f32, 0.0, 0.0]);
        let raw = scorer.score(&interest(), candidate.view(), None, now());

        let created = format(now() - Duration::days(10));
        let decayed = scorer.score(&interest(), candidate.view(), Some(created.as_str()), now());

        assert!((decayed - raw * 0.5_f64.powf(10.0 / 3.0)).abs() < 1e-4);
        assert!((decayed / raw - 0.0992).abs() < 1e-4);
    }

    #[test]
    fn test_malformed_timestamp_is_not_decayed() {
        let scorer = ContentScorer::new(3.0);
        let candidate = arr1(&[1.0_f32, 0.0, 0.0]);
        let raw = scorer.score(&interest(), candidate.view(), None, now());

        for bad in ["not-a-date", "2024-13-01T00:00:00Z", "2024-06-01T00:00:00.5Z", ""] {
            let score = scorer.score(&interest(), candidate.view(), Some(bad), now());
            assert_eq!(score, raw, "timestamp {:?} should not decay", bad);
        }
    }

    #[test]
    fn test_recency_factor_fresh_item() {
        let scorer = ContentScorer::new(3.0);
        assert_eq!(scorer.recency_factor(Some(format(now()).as_str()), now()), 1.0);
        assert_eq!(scorer.recency_factor(None, now()), 1.0);
    }

    #[test]
    fn test_recency_factor_future_item_exceeds_one() {
        let scorer = ContentScorer::new(3.0);
        let future = format(now() + Duration::days(3));
        assert!((scorer.recency_factor(Some(future.as_str()), now()) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_far_future_item_is_not_decayed() {
        let scorer = ContentScorer::new(3.0);
        let candidate = arr1(&[1.0_f32, 0.0, 0.0]);
        let raw = scorer.score(&interest(), candidate.view(), None, now());

        for far in ["2040-01-01T00:00:00Z", "9999-12-31T23:59:59Z"] {
            assert_eq!(scorer.recency_factor(Some(far), now()), 1.0);

            let score = scorer.score(&interest(), candidate.view(), Some(far), now());
            assert!(score.is_finite());
            assert_eq!(score, raw);

            let zero = InterestVector::zeros(3);
            assert_eq!(scorer.score(&zero, candidate.view(), Some(far), now()), 0.0);
        }
    }
}
