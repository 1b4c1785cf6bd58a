use axum::http::{HeaderValue, Method, header};
use core_config::cors::CorsConfig;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// Creates the CORS layer for the configured origin allow-list.
///
/// - Origins: exactly the configured list (no wildcard)
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Content-Type, Authorization
/// - Credentials allowed, 1 hour max age
///
/// Preflight requests are answered here with an empty 200 and never reach
/// the handlers.
///
/// # Errors
/// Returns `InvalidInput` if an origin is not a valid header value.
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS origin: {}", e),
            )
        })?;

    info!(
        "CORS configured with allowed origins: {}",
        config.allowed_origins.join(",")
    );

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}
