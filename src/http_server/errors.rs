//! # HTTP API Errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::Logger;
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a user route can answer with
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Body failed sanitization or validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            ApiError::Validation(e) => e.status_code(),
            ApiError::Store(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Validation failure body
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub ok: bool,
    pub message: String,
    pub errors: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(e) => {
                let body = ValidationResponse {
                    ok: false,
                    message: e.message.to_string(),
                    errors: e.errors,
                };
                (status, Json(body)).into_response()
            }
            ApiError::Store(StoreError::NotFound(_)) => {
                let body = ErrorResponse {
                    error: "User not found".to_string(),
                    code: status.as_u16(),
                };
                (status, Json(body)).into_response()
            }
            ApiError::Store(e) => {
                // details stay in the server log
                Logger::error("HTTP_STORE_ERROR", &[("code", e.code()), ("reason", &e.to_string())]);
                let body = ErrorResponse {
                    error: "Storage operation failed".to_string(),
                    code: status.as_u16(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
