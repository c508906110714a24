//! Structured error types for HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::types::{MSG_NOT_FOUND, MessageResponse};

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    TaskNotFound,
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::TaskNotFound => StatusCode::NOT_FOUND,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Structured error returned by route handlers.
#[derive(Debug, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn task_not_found() -> Self {
        Self::new(ErrorCode::TaskNotFound, MSG_NOT_FOUND)
    }

    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, err.to_string())
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }
}

// Store operations return anyhow errors; anything reaching a handler that way
// came from the database.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) if err.downcast_ref::<rusqlite::Error>().is_some() => ApiError::database(err),
            Err(err) => ApiError::internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        match self.code {
            // Not-found keeps the plain `{message}` body the client expects.
            ErrorCode::TaskNotFound => {
                (status, Json(MessageResponse::new(self.message))).into_response()
            }
            _ => {
                error!(code = ?self.code, error = %self.message, "Request failed");
                (status, Json(self)).into_response()
            }
        }
    }
}

/// Result type for route handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
