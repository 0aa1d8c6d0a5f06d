//! Axum extractors for authentication and authorization.
//!
//! These read the [`AuthContext`] that [`crate::AuthLayer`] stored in the
//! request extensions; they never authenticate on their own.
//!
//! # Usage
//!
//! ```ignore
//! use shelf_axum::{MaybeAuth, RequireAuth};
//!
//! // Protected: 403 for anonymous callers, handler body never runs
//! async fn add_book(RequireAuth(user): RequireAuth) -> String {
//!     format!("added by {}", user.username)
//! }
//!
//! // Public: works with or without a token
//! async fn me(MaybeAuth(ctx): MaybeAuth) -> String {
//!     match ctx.user() {
//!         Some(user) => user.username.clone(),
//!         None => "guest".to_string(),
//!     }
//! }
//! ```

use std::ops::Deref;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shelf_auth_core::AuthContext;
use shelf_types::User;

use crate::error::AuthRejection;

/// Extension key for storing auth context in request extensions.
#[derive(Debug, Clone)]
pub struct AuthContextExt(pub AuthContext);

fn context_from_parts(parts: &Parts) -> AuthContext {
    parts
        .extensions
        .get::<AuthContextExt>()
        .map(|ext| ext.0.clone())
        .unwrap_or_default()
}

/// Extractor that applies the authorization gate.
///
/// Rejects anonymous requests with `PermissionDenied`.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub User);

impl Deref for RequireAuth {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = context_from_parts(parts).into_authenticated()?;
        Ok(Self(user))
    }
}

/// Extractor for optional authentication.
///
/// Yields the context as resolved, anonymous included.
#[derive(Debug, Clone)]
pub struct MaybeAuth(pub AuthContext);

impl Deref for MaybeAuth {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(context_from_parts(parts)))
    }
}
