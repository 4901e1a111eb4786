/// Ranking API Handlers
///
/// HTTP endpoints for ranking a caller-supplied batch of content
use actix_web::{error::JsonPayloadError, get, post, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, ErrorResponse, Result};
use crate::models::RankRequest;
use crate::services::Ranker;

/// Handler state for the ranking endpoints
pub struct RankHandlerState {
    pub ranker: Arc<Ranker>,
    pub service_name: String,
}

/// POST /rank
/// Rank the request's content for the user behind its interactions
#[post("/rank")]
pub async fn rank(
    body: web::Json<RankRequest>,
    state: web::Data<RankHandlerState>,
) -> Result<HttpResponse> {
    let req = body.into_inner();
    let request_id = Uuid::new_v4();

    req.validate().map_err(|e| {
        warn!(request_id = %request_id, error = %e, "Rejected rank request");
        AppError::from(e)
    })?;

    info!(
        request_id = %request_id,
        business_id = %req.business_id,
        user_id = req.user_id.as_deref().unwrap_or("-"),
        limit = req.limit,
        content_count = req.content.len(),
        interaction_count = req.interactions.len(),
        "Rank request"
    );

    match state
        .ranker
        .rank(&req.content, &req.interactions, req.limit)
        .await
    {
        Ok(ranked) => Ok(HttpResponse::Ok().json(ranked)),
        Err(err) => {
            error!(request_id = %request_id, "Failed to rank content: {}", err);
            Err(err.into())
        }
    }
}

/// GET /health
#[get("/health")]
pub async fn health(state: web::Data<RankHandlerState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": state.service_name,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// JSON extractor config: bounded body, errors in the service's error shape
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            let message = err.to_string();
            warn!("Malformed rank request body: {}", message);
            let response = HttpResponse::BadRequest().json(ErrorResponse {
                error: message,
                code: 400,
            });
            actix_web::error::InternalError::from_response(err, response).into()
        })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(rank).service(health);
}
