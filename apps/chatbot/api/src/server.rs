//! HTTP server initialization and lifecycle management
//!
//! - Tracing initialization
//! - Embedding model load and Pinecone host resolution
//! - Router assembly (chat, health, OpenAPI, fallbacks, CORS)
//! - Server startup with graceful shutdown

use axum::Router;
use axum_helpers::{create_app, create_router, health_router};
use core_config::AppInfo;
use core_config::cors::CorsConfig;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_rag::RagPipeline;
use eyre::{Result, WrapErr};
use tracing::info;

use crate::config::Config;
use crate::openapi::ApiDoc;

/// Assembles the full router around an already-built pipeline.
///
/// # Errors
///
/// Returns an error if a CORS origin is not a valid header value.
pub fn build_router(
    pipeline: RagPipeline,
    app_info: AppInfo,
    cors: &CorsConfig,
) -> std::io::Result<Router> {
    let routes = domain_rag::router(pipeline).merge(health_router(app_info));
    create_router::<ApiDoc>(routes, cors)
}

/// Run the HTTP server
///
/// 1. Loads `.env` and configuration
/// 2. Sets up structured logging (JSON for prod, pretty for dev)
/// 3. Builds the retrieval-generation pipeline once
/// 4. Serves until SIGINT/SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - a required variable is missing or a value does not parse
/// - the embedding model cannot be loaded
/// - the Pinecone index host cannot be resolved
/// - the listener cannot bind
pub async fn run() -> Result<()> {
    install_color_eyre();

    // Must run before Config::from_env; missing .env is fine
    let dotenv = dotenvy::dotenv();

    let config = Config::from_env().wrap_err("Failed to load configuration")?;
    init_tracing(&config.environment);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    info!(
        embedding = %config.rag.embedding.provider_type(),
        index = %config.rag.pinecone.index_name,
        model = %config.rag.gemini.model,
        top_k = config.rag.top_k,
        "Building retrieval pipeline"
    );
    let pipeline = RagPipeline::from_config(config.rag.clone())
        .await
        .wrap_err("Failed to initialize retrieval pipeline")?;

    let router = build_router(pipeline, config.app, &config.cors)
        .wrap_err("Failed to build router")?;

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );
    create_app(router, &config.server)
        .await
        .wrap_err("Server failed")?;

    Ok(())
}
