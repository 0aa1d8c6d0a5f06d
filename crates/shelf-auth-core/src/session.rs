//! Session verification
//!
//! A session is nothing more than a signed token. Verification checks the
//! signature first and the expiry second, so a forged token always reports
//! `InvalidToken` and only a genuine but stale one reports `ExpiredToken`.

use chrono::Utc;
use shelf_types::UserId;

use crate::token::TokenCodec;
use crate::AuthError;

/// Verifies bearer tokens against signature and expiry
#[derive(Clone, Debug)]
pub struct SessionVerifier {
    codec: TokenCodec,
}

impl SessionVerifier {
    /// Create a new session verifier
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    /// Verify a token against the current wall clock and return its subject
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    /// Verify a token against an explicit time (epoch milliseconds)
    pub fn verify_at(&self, token: &str, now_ms: i64) -> Result<UserId, AuthError> {
        let claims = self.codec.decode(token)?;

        if claims.is_expired_at(now_ms) {
            tracing::debug!(subject = %claims.subject, "Token expired");
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims.subject)
    }
}
