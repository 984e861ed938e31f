//! JSON body extractor that validates the payload

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use financeai_core::Validate;
use serde::de::DeserializeOwned;

/// Like `Json<T>`, but malformed bodies and failed validation both become
/// a 400 carrying `T::INVALID_MESSAGE`.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                ApiError::bad_request(T::INVALID_MESSAGE)
            })?;

        value.validate().map_err(|e| {
            tracing::debug!("Validation failed: {}", e);
            ApiError::bad_request(T::INVALID_MESSAGE)
        })?;

        Ok(ValidJson(value))
    }
}
