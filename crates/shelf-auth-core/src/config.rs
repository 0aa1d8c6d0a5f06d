//! Configuration types for auth service

use std::time::Duration;

use crate::key::SigningKey;
use crate::AuthError;

/// Default token issuer label
pub const DEFAULT_ISSUER: &str = "shelf";

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Auth service configuration
///
/// Built once at startup and shared read-only; nothing here changes while the
/// process runs.
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared secret for token signing
    pub token_secret: String,
    /// Issuer label written into every token
    pub issuer: String,
    /// Duration added to issued-at to compute expiry
    pub token_lifetime: Duration,
}

impl AuthConfig {
    /// Create a new auth config, validating the secret length.
    ///
    /// # Errors
    /// Returns `AuthError::Configuration` if the secret is shorter than
    /// [`SigningKey::MIN_LENGTH`] bytes.
    pub fn try_new(token_secret: impl Into<String>) -> Result<Self, AuthError> {
        let token_secret = token_secret.into();
        SigningKey::new(&token_secret).map_err(|e| AuthError::Configuration(e.to_string()))?;
        Ok(Self {
            token_secret,
            issuer: DEFAULT_ISSUER.to_string(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
        })
    }

    /// Set the issuer label
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set token lifetime
    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    /// Build the signing key for this config
    pub fn signing_key(&self) -> Result<SigningKey, AuthError> {
        SigningKey::new(&self.token_secret).map_err(|e| AuthError::Configuration(e.to_string()))
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("token_lifetime", &self.token_lifetime)
            .finish_non_exhaustive()
    }
}
