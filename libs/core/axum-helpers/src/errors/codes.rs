//! Type-safe error codes for API responses.
//!
//! Each code has a string identifier for clients, an integer for logs and a
//! default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::messages;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body parsed but failed validation
    ValidationError,

    /// Request body missing or not valid JSON
    InvalidJson,

    /// No route matches the requested path
    NotFound,

    /// Route exists but not for this method
    MethodNotAllowed,

    // Server errors (5000-5999)
    /// A collaborator service (embeddings, index, model) failed
    UpstreamError,

    /// An unexpected internal server error occurred
    InternalError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for programmatic handling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::UpstreamError => "UPSTREAM_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Integer code attached to structured logs.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidJson => 1002,
            Self::NotFound => 1004,
            Self::MethodNotAllowed => 1005,
            Self::UpstreamError => 5002,
            Self::InternalError => 5001,
        }
    }

    /// Default user-facing message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidJson => messages::NO_JSON_DATA,
            Self::NotFound => "Resource not found",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::UpstreamError | Self::InternalError => messages::PROCESSING_FAILED,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
