//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Rejections are [`AppError`]s, so a missing body, malformed JSON and a
/// failed `Validate` check all render as the standard JSON error with a 400.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Ask {
///     #[serde(default)]
///     #[validate(length(min = 1, message = "No message provided"))]
///     message: String,
/// }
///
/// async fn ask(ValidatedJson(payload): ValidatedJson<Ask>) -> String {
///     payload.message
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
