use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

/// Liveness endpoint handler.
///
/// Always 200 while the process serves requests; it never touches upstream
/// services, so it stays green when they are down.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    let label = if app.description.is_empty() {
        app.name
    } else {
        app.description
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        message: format!("{} is running", label),
        version: app.version.to_string(),
    })
}

/// Creates a router with the /health endpoint.
///
/// # Example
/// ```ignore
/// use axum_helpers::health_router;
/// use core_config::app_info;
///
/// let app = Router::new().merge(health_router(app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
