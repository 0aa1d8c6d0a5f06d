//! Token signing key

use jsonwebtoken::{DecodingKey, EncodingKey};
use std::sync::Arc;

/// Shared secret for HS256 token signatures, length-checked on creation.
#[derive(Clone)]
pub struct SigningKey {
    secret: Arc<[u8]>,
}

impl SigningKey {
    /// Shortest accepted secret in bytes (256 bits)
    pub const MIN_LENGTH: usize = 32;

    /// Wrap a secret.
    ///
    /// # Errors
    /// Returns [`SigningKeyError::TooShort`] below [`Self::MIN_LENGTH`] bytes.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SigningKeyError> {
        let secret = secret.as_ref();
        if secret.len() < Self::MIN_LENGTH {
            return Err(SigningKeyError::TooShort {
                actual: secret.len(),
                minimum: Self::MIN_LENGTH,
            });
        }
        Ok(Self {
            secret: Arc::from(secret),
        })
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.secret)
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.secret)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("secret_len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SigningKeyError {
    #[error("token secret too short: {actual} bytes, need at least {minimum}")]
    TooShort { actual: usize, minimum: usize },
}
