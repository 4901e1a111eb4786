// Utility functions for content-ranker

use chrono::{DateTime, NaiveDateTime, ParseError, Utc};
use ndarray::ArrayView1;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Strict creation timestamp layout, e.g. `2024-05-01T12:30:00Z`
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Stabilizes the cosine denominator when a norm is zero
const COSINE_EPSILON: f64 = 1e-9;

/// Half-life decay: the weight halves every `half_life` units of elapsed time.
///
/// Negative elapsed time (future timestamps) yields values above 1.0.
pub fn half_life_decay(elapsed: f64, half_life: f64) -> f64 {
    0.5_f64.powf(elapsed / half_life)
}

/// Cosine similarity with an epsilon-stabilized denominator.
///
/// Callers must pass vectors of the same dimension. Products are summed in
/// `f64` so any finite `f32` input yields a finite result.
pub fn cosine_similarity(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f64 {
    let a = a.mapv(f64::from);
    let b = b.mapv(f64::from);

    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    dot / (norm_a * norm_b + COSINE_EPSILON)
}

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` timestamp as UTC.
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    NaiveDateTime::parse_from_str(raw, CREATED_AT_FORMAT).map(|naive| naive.and_utc())
}

/// Fractional days between two instants (negative if `then` is after `now`)
pub fn days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - then).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
}
