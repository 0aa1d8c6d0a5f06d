//! Error responses for auth middleware and extractors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shelf_auth_core::AuthError;

/// JSON error envelope: `{ "error": { "code", "message" } }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// Rejection carrying an [`AuthError`] to the caller.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct AuthRejection(#[from] pub AuthError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if err.is_internal() {
            tracing::error!(error = %err, "Internal auth error");
            "internal error".to_string()
        } else {
            err.to_string()
        };

        (status, Json(ErrorResponse::new(err.error_code(), message))).into_response()
    }
}
