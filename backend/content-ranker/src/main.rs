use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use content_ranker::handlers::{self, RankHandlerState};
use content_ranker::{Config, OpenAiEmbeddingProvider, Ranker};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,content_ranker=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true),
        )
        .init();

    // Load config
    let config = Config::from_env().context("Failed to load configuration")?;

    info!(
        "Starting {} v{} on {}:{}",
        config.service.service_name,
        env!("CARGO_PKG_VERSION"),
        config.service.host,
        config.service.http_port
    );

    let provider = OpenAiEmbeddingProvider::new(&config.embedding)
        .context("Failed to create embedding provider")?;
    info!(
        model = %config.embedding.model,
        dimension = config.embedding.dimension,
        "Embedding provider initialized"
    );

    let ranker = Arc::new(Ranker::with_config(Arc::new(provider), &config.ranking));
    let state = web::Data::new(RankHandlerState {
        ranker,
        service_name: config.service.service_name.clone(),
    });
    let max_body_bytes = config.service.max_body_bytes;

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(handlers::json_config(max_body_bytes))
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind((config.service.host.as_str(), config.service.http_port))
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
