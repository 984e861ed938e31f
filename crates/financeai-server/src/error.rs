//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use financeai_core::FinanceError;
use serde_json::json;

/// Error returned by handlers, rendered as `{"message": ...}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// Log the detail and return a generic 500
    pub fn internal(err: impl std::fmt::Display, message: &str) -> Self {
        tracing::error!("{}: {}", message, err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }

    /// Map a domain error, using `message` as the client-facing text
    pub fn from_error(err: FinanceError, message: &str) -> Self {
        match err {
            FinanceError::Validation(detail) | FinanceError::Conflict(detail) => {
                tracing::debug!("{}: {}", message, detail);
                Self::bad_request(message)
            }
            FinanceError::NotFound(detail) => {
                tracing::debug!("{}: {}", message, detail);
                Self::not_found(message)
            }
            other => Self::internal(other, message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.message }));
        (self.status, body).into_response()
    }
}
