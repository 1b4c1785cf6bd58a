use super::shutdown::shutdown_signal;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{create_cors_layer, security_headers};
use axum::{Json, Router, middleware, routing::get};
use core_config::cors::CorsConfig;
use core_config::server::ServerConfig;
use std::io;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Starts the Axum server with graceful shutdown on SIGINT/SIGTERM.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    info!("Server stopped");
    Ok(())
}

/// Wraps application routes with the cross-cutting concerns every service gets.
///
/// - `GET /api-docs/openapi.json` serving `T`'s OpenAPI document
/// - JSON 404 fallback (empty 200 for `OPTIONS`)
/// - JSON 405 for known paths called with the wrong method
/// - request tracing, security headers and CORS
///
/// `apis` is merged at the root, not nested, so services own their full paths.
/// Its state must already be applied.
///
/// # Errors
/// Returns `InvalidInput` if the CORS configuration contains an invalid origin.
pub fn create_router<T>(apis: Router, cors: &CorsConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = create_cors_layer(cors)?;
    let openapi = T::openapi();

    let router = Router::new()
        .route(
            "/api-docs/openapi.json",
            get(move || async move { Json(openapi) }),
        )
        .merge(apis)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer);

    Ok(router)
}
