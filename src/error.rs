//! Error handling module
//!
//! HTTP-facing error type and JSON response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::users::UserError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced by the HTTP API
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 400 Bad Request
    #[error(transparent)]
    Validation(#[from] UserError),

    // 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    // 405 Method Not Allowed
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
