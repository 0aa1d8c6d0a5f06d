//! Signed bearer tokens
//!
//! Tokens are compact HS256 JWTs carrying [`Claims`]. The server keeps no
//! session table; a token is its own session record and cannot be revoked
//! before it expires.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, Header, Validation};
use serde::{Deserialize, Serialize};
use shelf_types::UserId;
use std::time::Duration;

use crate::key::SigningKey;
use crate::{AuthConfig, AuthError};

/// Claims carried inside a token
///
/// Timestamps are Unix epoch milliseconds. All four fields are required and
/// nothing else is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(rename = "usr")]
    pub subject: UserId,
    /// Issuer label
    #[serde(rename = "iss")]
    pub issuer: String,
    /// Issued at (informational only)
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiration
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    /// Build claims issued at `now` and valid for `lifetime`
    pub fn new(
        subject: UserId,
        issuer: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let issued_at = now.timestamp_millis();
        let lifetime_ms = i64::try_from(lifetime.as_millis()).unwrap_or(i64::MAX);
        Self {
            subject,
            issuer: issuer.into(),
            issued_at,
            expires_at: issued_at.saturating_add(lifetime_ms),
        }
    }

    /// A token is expired once `now` reaches its expiry
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at <= now_ms
    }
}

/// Login response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub value: String,
}

/// Encodes claims into signed tokens and decodes them back
#[derive(Clone)]
pub struct TokenCodec {
    key: SigningKey,
    header: Header,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec from a length-checked signing key
    pub fn new(key: SigningKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is millisecond-based and checked by the session verifier
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            key,
            header: Header::new(Algorithm::HS256),
            validation,
        }
    }

    /// Create a codec from auth config
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self::new(config.signing_key()?))
    }

    /// Serialize and sign claims
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&self.header, claims, &self.key.encoding_key()).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AuthError::Internal("Failed to issue token".to_string())
        })
    }

    /// Verify a token's signature and algorithm, then decode its claims.
    ///
    /// Claims are not deserialized until the signature matches. Every
    /// failure is reported as [`AuthError::InvalidToken`].
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.key.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(kind = ?e.kind(), "Token rejected");
                AuthError::InvalidToken
            })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key", &self.key)
            .field("alg", &self.header.alg)
            .finish_non_exhaustive()
    }
}
