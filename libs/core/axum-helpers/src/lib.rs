//! # Axum Helpers
//!
//! Shared building blocks for the Axum services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, health endpoint, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Validated JSON extractor
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{app_info, cors::CorsConfig, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let routes = Router::new().merge(health_router(app_info!()));
//!     let router = create_router::<ApiDoc>(routes, &CorsConfig::default())?;
//!     create_app(router, &ServerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    HealthResponse, create_app, create_router, health_handler, health_router, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::ValidatedJson;
