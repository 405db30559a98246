//! REST API specific error types and conversions

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use racelab_core::CoreError;
use serde_json::json;
use thiserror::Error;

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        RestError::NotFound(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            RestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            RestError::BadRequest(_) => "BAD_REQUEST",
            RestError::NotFound(_) => "NOT_FOUND",
            RestError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<CoreError> for RestError {
    fn from(err: CoreError) -> Self {
        match err {
            // Routing misses surface as 404s on the HTTP boundary.
            CoreError::UnknownEndpoint { .. } => RestError::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_response = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "status": status.as_u16()
            }
        });
        (status, Json(error_response)).into_response()
    }
}
