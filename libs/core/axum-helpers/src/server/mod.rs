//! Server infrastructure module.
//!
//! - Router assembly with OpenAPI document, fallbacks and middleware
//! - Health endpoint
//! - Graceful shutdown
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{app_info, cors::CorsConfig, server::ServerConfig};
//!
//! let routes = api_routes.merge(health_router(app_info!()));
//! let router = create_router::<ApiDoc>(routes, &CorsConfig::default())?;
//! create_app(router, &ServerConfig::default()).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthResponse, health_handler, health_router};
pub use shutdown::shutdown_signal;
