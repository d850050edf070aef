//! API error types and their JSON representation.
//!
//! Every failure is rendered as `{"error": CODE, "message": text}` with the
//! status code the underlying error declares.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use tripsplit_core::settlement::SettlementError;
use tripsplit_core::split::SplitError;
use tripsplit_shared::AppError;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Application-level failure (bad request shape, configuration).
    #[error(transparent)]
    App(#[from] AppError),

    /// A split failed validation.
    #[error(transparent)]
    Split(#[from] SplitError),

    /// A trip snapshot could not be settled.
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ApiError {
    /// Shorthand for a 400 response caused by the request body.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::App(AppError::Validation(message.into()))
    }

    /// Returns the error code for the response body.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Split(e) => e.error_code(),
            Self::Settlement(e) => e.error_code(),
        }
    }

    /// Returns the HTTP status for the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Split(_) => 400,
            Self::Settlement(e) => e.http_status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, code = self.error_code(), "Request failed");
        }

        let body = ErrorResponse {
            error: self.error_code(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// API result type.
pub type ApiResult<T> = Result<T, ApiError>;
