use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::ProviderError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every way a request can fail, each tied to one status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed or out-of-range path parameter. No provider call was made.
    #[error("{0}")]
    Validation(String),

    /// A lookup, singleton or parent probe matched no row.
    #[error("{0}")]
    NotFound(String),

    /// The provider failed; its message is passed through.
    #[error("{0}")]
    Provider(String),

    /// An invariant was violated. The detail is logged, never returned.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Provider(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message placed in the response body.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::Provider(err.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(message) => log::debug!("rejected request: {}", message),
            ApiError::NotFound(message) => log::debug!("not found: {}", message),
            ApiError::Provider(message) => log::error!("provider error: {}", message),
            ApiError::Internal(detail) => log::error!("internal error: {}", detail),
        }

        let status = self.status_code();
        (status, Json(ErrorResponse::new(&self.public_message()))).into_response()
    }
}
