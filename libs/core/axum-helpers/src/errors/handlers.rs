use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::AppError;

/// Fallback for unmatched paths.
///
/// `OPTIONS` gets an empty 200 so browser preflights never hit a 404; every
/// other method gets a JSON 404 naming the path.
pub async fn not_found(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    AppError::NotFound(format!("Endpoint {} not found", uri.path())).into_response()
}

/// Fallback for known paths called with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    AppError::MethodNotAllowed(format!("Method {} not allowed on {}", method, uri.path()))
        .into_response()
}
