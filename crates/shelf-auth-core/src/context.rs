//! Per-request authentication context and the authorization gate.

use shelf_types::User;

use crate::AuthError;

/// Outcome of credential resolution for a single request.
///
/// Created fresh for every request and dropped with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthContext {
    /// No usable credential was presented
    #[default]
    Anonymous,
    /// Token verified and its subject resolved to a stored user
    Authenticated(User),
}

impl AuthContext {
    /// Check if the request is authenticated
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The authenticated user, if any
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    /// Gate for protected operations.
    ///
    /// Call before any state change; an anonymous context yields
    /// `PermissionDenied` and the operation must not run.
    pub fn require_authenticated(&self) -> Result<&User, AuthError> {
        self.user().ok_or(AuthError::PermissionDenied)
    }

    /// Consuming variant of [`Self::require_authenticated`]
    pub fn into_authenticated(self) -> Result<User, AuthError> {
        match self {
            Self::Authenticated(user) => Ok(user),
            Self::Anonymous => Err(AuthError::PermissionDenied),
        }
    }
}

/// Free-function form of [`AuthContext::require_authenticated`]
pub fn require_authenticated(context: &AuthContext) -> Result<&User, AuthError> {
    context.require_authenticated()
}
