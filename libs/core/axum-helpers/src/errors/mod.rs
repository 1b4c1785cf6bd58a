pub mod codes;
pub mod handlers;
pub mod messages;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// ```json
/// {
///   "error": "No message provided",
///   "code": "VALIDATION_ERROR"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error kind
    pub code: ErrorCode,
    /// Optional structured details (e.g., validation field errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Server-side variants carry a detail string that is logged and never sent
/// to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Method Not Allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// The error kind reported to clients.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::InvalidJson,
            AppError::ValidationError(_) | AppError::BadRequest(_) => ErrorCode::ValidationError,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::MethodNotAllowed(_) => ErrorCode::MethodNotAllowed,
            AppError::Upstream(_) => ErrorCode::UpstreamError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Upstream(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::info!(error_code = code.code(), "JSON extraction error: {}", e);
                (json_rejection_message(&e), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = code.code(), "Validation error: {}", e);
                let message = first_validation_message(&e)
                    .unwrap_or_else(|| code.default_message().to_string());
                (message, serde_json::to_value(&e).ok())
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = code.code(), "Bad request: {}", msg);
                (msg, None)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                (msg, None)
            }
            AppError::MethodNotAllowed(msg) => {
                tracing::info!(error_code = code.code(), "Method not allowed: {}", msg);
                (msg, None)
            }
            AppError::Upstream(detail) => {
                tracing::error!(error_code = code.code(), "Upstream failure: {}", detail);
                (code.default_message().to_string(), None)
            }
            AppError::InternalServerError(detail) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", detail);
                (code.default_message().to_string(), None)
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code,
            details,
        });

        (status, body).into_response()
    }
}

fn json_rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => messages::NO_JSON_DATA.to_string(),
        JsonRejection::JsonSyntaxError(_) => messages::INVALID_JSON_DATA.to_string(),
        JsonRejection::JsonDataError(e) => e.body_text(),
        _ => messages::NO_JSON_DATA.to_string(),
    }
}

fn first_validation_message(errors: &ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
}
