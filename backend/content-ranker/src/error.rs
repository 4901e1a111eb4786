use crate::services::ranking::RankingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Ranking failed: {0}")]
    Ranking(#[from] RankingError),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        HttpResponse::build(code).json(ErrorResponse {
            error: self.to_string(),
            code: code.as_u16(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Ranking(RankingError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            AppError::Ranking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::embedding::EmbeddingError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("limit".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(RankingError::InvalidInput("empty".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(RankingError::Embedding(EmbeddingError::Request(
                "timeout".to_string()
            )))
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
