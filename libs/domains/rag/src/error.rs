use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type RagResult<T> = Result<T, RagError>;

impl RagError {
    /// True for failures of the embedding, index or model collaborators.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            RagError::Embedding(_) | RagError::Index(_) | RagError::Generation(_)
        )
    }
}

impl From<ConfigError> for RagError {
    fn from(err: ConfigError) -> Self {
        RagError::Config(err.to_string())
    }
}

/// Convert RagError to AppError for standardized HTTP error responses
impl From<RagError> for AppError {
    fn from(err: RagError) -> Self {
        match err {
            RagError::Validation(msg) => AppError::BadRequest(msg),
            RagError::Embedding(msg) => AppError::Upstream(format!("Embedding error: {}", msg)),
            RagError::Index(msg) => AppError::Upstream(format!("Vector index error: {}", msg)),
            RagError::Generation(msg) => {
                AppError::Upstream(format!("Generation error: {}", msg))
            }
            RagError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
        }
    }
}

impl IntoResponse for RagError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
