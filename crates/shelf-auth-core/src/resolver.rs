//! Request context resolution
//!
//! Turns the raw `Authorization` header of one request into an
//! [`AuthContext`]. A missing or non-bearer header is anonymous; a bearer
//! token that fails verification fails the whole request.

use shelf_db::UserRepository;
use std::sync::Arc;

use crate::context::AuthContext;
use crate::session::SessionVerifier;
use crate::AuthError;

const BEARER_PREFIX: &str = "bearer ";

/// Extract the token from an `Authorization` header value.
///
/// The `Bearer ` prefix is matched case-insensitively. Returns `None` when
/// the prefix is absent.
pub fn bearer_token(header: &str) -> Option<&str> {
    let prefix = header.get(..BEARER_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(BEARER_PREFIX)
        .then(|| &header[BEARER_PREFIX.len()..])
}

/// Resolves request credentials to an authentication context
pub struct ContextResolver<U: UserRepository> {
    verifier: SessionVerifier,
    user_repo: Arc<U>,
}

impl<U: UserRepository> ContextResolver<U> {
    /// Create a new resolver
    pub fn new(verifier: SessionVerifier, user_repo: Arc<U>) -> Self {
        Self {
            verifier,
            user_repo,
        }
    }

    /// Resolve the `Authorization` header of one request.
    ///
    /// Nothing is retained between calls; dropping the returned future
    /// before the user lookup completes leaves no state behind.
    pub async fn resolve(&self, header: Option<&str>) -> Result<AuthContext, AuthError> {
        let Some(header) = header else {
            return Ok(AuthContext::Anonymous);
        };

        let Some(token) = bearer_token(header) else {
            tracing::debug!("Authorization header without bearer prefix, treating as anonymous");
            return Ok(AuthContext::Anonymous);
        };

        let subject = self.verifier.verify(token)?;

        match self.user_repo.find_by_id(subject.0).await? {
            Some(row) => Ok(AuthContext::Authenticated(row.into())),
            None => {
                tracing::debug!(subject = %subject, "Token subject no longer exists");
                Err(AuthError::UnknownSubject)
            }
        }
    }
}

impl<U: UserRepository> std::fmt::Debug for ContextResolver<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextResolver")
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}
