//! Error types for the library API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shelf_auth_core::AuthError;
use shelf_axum::ErrorResponse;

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error")]
    Database(#[from] shelf_db::DbError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Auth(e) => e.error_code(),
        }
    }

    fn is_internal(&self) -> bool {
        match self {
            Self::Database(_) => true,
            Self::Auth(e) => e.is_internal(),
            _ => false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        let message = if self.is_internal() {
            tracing::error!(error = ?self, "Internal API error");
            "internal error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
