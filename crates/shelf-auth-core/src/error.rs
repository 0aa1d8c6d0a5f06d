//! Auth errors

use thiserror::Error;

/// Authentication and authorization errors
///
/// Every failure is terminal for the request that hit it; none are retried.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown username or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Invalid token (malformed, bad signature, unexpected claims)
    #[error("invalid token")]
    InvalidToken,

    /// Token signature is valid but its expiry has passed
    #[error("token expired")]
    ExpiredToken,

    /// Token is valid but the user it names no longer exists
    #[error("unknown subject")]
    UnknownSubject,

    /// Protected operation attempted without authentication
    #[error("permission denied")]
    PermissionDenied,

    /// Registration with a username that already exists
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    /// Rejected registration input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Store error
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::ExpiredToken
            | Self::UnknownSubject => 401,
            Self::PermissionDenied => 403,
            Self::UsernameTaken(_) => 409,
            Self::InvalidInput(_) => 400,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ExpiredToken => "TOKEN_EXPIRED",
            Self::UnknownSubject => "UNKNOWN_SUBJECT",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::UsernameTaken(_) => "USERNAME_TAKEN",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is a server-side fault rather than a caller error
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<shelf_db::DbError> for AuthError {
    fn from(err: shelf_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}
