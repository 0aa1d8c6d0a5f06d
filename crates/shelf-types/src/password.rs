//! Password digests
//!
//! Passwords are stored as the lowercase hex SHA-256 of the plaintext. The
//! digest is deterministic and unsalted, so the same plaintext always maps to
//! the same 64-character string.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// One-way digest of a plaintext password
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash a plaintext password. Any input is accepted, including empty.
    pub fn hash(plaintext: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap an already computed hex digest (e.g. loaded from a store).
    ///
    /// Returns `None` unless the value is exactly 64 lowercase hex characters.
    pub fn from_hex(hex: impl Into<String>) -> Option<Self> {
        let hex = hex.into();
        let valid = hex.len() == DIGEST_HEX_LEN
            && hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        valid.then_some(Self(hex))
    }

    /// Check a candidate plaintext against this digest in constant time
    pub fn matches(&self, plaintext: &str) -> bool {
        let candidate = Self::hash(plaintext);
        self.0.as_bytes().ct_eq(candidate.0.as_bytes()).into()
    }

    /// Hex representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}
