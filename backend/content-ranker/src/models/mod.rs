use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound for both the candidate batch and the result limit
pub const MAX_POSTS: usize = 100;

fn default_limit() -> usize {
    MAX_POSTS
}

/// A candidate content item supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `YYYY-MM-DDTHH:MM:SSZ`; anything else disables recency decay for the item
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ContentItem {
    /// Text sent to the embedding provider: title, description, body, tags
    pub fn embedding_text(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            self.title,
            self.description,
            self.body.as_deref().unwrap_or(""),
            self.tags.join(" ")
        )
    }
}

/// A user interaction with one of the request's content items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub content_id: String,
    /// Feedback type tag, matched case-insensitively
    #[serde(rename = "type")]
    pub kind: String,
    /// Unix timestamp (seconds)
    pub timestamp: i64,
}

impl InteractionEvent {
    pub fn feedback(&self) -> FeedbackType {
        FeedbackType::parse(&self.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    Like,
    Share,
    Comment,
    View,
    Other,
}

impl FeedbackType {
    pub fn parse(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "LIKE" => FeedbackType::Like,
            "SHARE" => FeedbackType::Share,
            "COMMENT" => FeedbackType::Comment,
            "VIEW" => FeedbackType::View,
            _ => FeedbackType::Other,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            FeedbackType::Like => 3.0,
            FeedbackType::Share => 5.0,
            FeedbackType::Comment => 2.0,
            FeedbackType::View => 1.0,
            // Unrecognized types count as a plain view
            FeedbackType::Other => 1.0,
        }
    }
}

/// POST /rank request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub business_id: String,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
    #[validate(length(min = 1, max = 100))]
    pub content: Vec<ContentItem>,
    #[serde(default)]
    pub interactions: Vec<InteractionEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub content_id: String,
    pub score: f64,
}
