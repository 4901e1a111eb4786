use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub embedding: EmbeddingConfig,
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub http_port: u16,
    pub service_name: String,
    /// Maximum accepted JSON body in bytes
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    pub half_life_days: f64,
    pub embedding_dim: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let dimension = parse_or("EMBEDDING_DIM", 1536)?;
        let half_life_days: f64 = parse_or("RANK_HALF_LIFE_DAYS", 3.0)?;
        if !(half_life_days.is_finite() && half_life_days > 0.0) {
            return Err(ConfigError::Invalid {
                name: "RANK_HALF_LIFE_DAYS",
                value: half_life_days.to_string(),
            });
        }

        Ok(Config {
            service: ServiceConfig {
                host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                http_port: parse_or("HTTP_PORT", 8000)?,
                service_name: env::var("SERVICE_NAME")
                    .unwrap_or_else(|_| "content-ranker".to_string()),
                max_body_bytes: parse_or("MAX_BODY_BYTES", 2 * 1024 * 1024)?,
            },
            embedding: EmbeddingConfig {
                api_key: env::var("OPENAI_API_KEY")
                    .map_err(|_| ConfigError::Missing("OPENAI_API_KEY"))?,
                base_url: env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "text-embedding-ada-002".to_string()),
                timeout_secs: parse_or("EMBEDDING_TIMEOUT_SECS", 30)?,
                dimension,
            },
            ranking: RankingConfig {
                half_life_days,
                embedding_dim: dimension,
            },
        })
    }
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
