//! Error types for the render service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Service Error Enum ==
/// Unified error type for the render service.
///
/// Cache operations themselves are total; only construction and the
/// surrounding service can fail.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Cache or service parameters that can never work (zero limits etc.)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A cache administration call was made while caching is switched off
    #[error("Cache is disabled")]
    CacheDisabled,

    /// The external renderer failed or could not be reached
    #[error("Render failed: {0}")]
    Render(String),
}

impl ServiceError {
    /// HTTP status used when this error is returned by a handler.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::CacheDisabled => StatusCode::CONFLICT,
            ServiceError::Render(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the render service.
pub type Result<T> = std::result::Result<T, ServiceError>;
