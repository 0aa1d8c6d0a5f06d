//! Tower middleware layer that resolves the auth context of each request.
//!
//! [`AuthLayer`] reads the `Authorization` header once per request and
//! stores the resulting [`AuthContext`](shelf_auth_core::AuthContext) in the
//! request extensions. A token that is present but fails verification ends
//! the request here, before any handler runs.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::{IntoResponse, Response};
use shelf_auth_core::AuthService;
use shelf_db::UserRepository;
use tower::{Layer, Service};

use crate::error::AuthRejection;
use crate::extractors::AuthContextExt;

/// Tower layer that adds request context resolution.
pub struct AuthLayer<U: UserRepository> {
    auth: Arc<AuthService<U>>,
}

impl<U: UserRepository> AuthLayer<U> {
    /// Create a new layer backed by the given auth service.
    #[must_use]
    pub fn new(auth: Arc<AuthService<U>>) -> Self {
        Self { auth }
    }
}

impl<U: UserRepository> Clone for AuthLayer<U> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
        }
    }
}

impl<S, U: UserRepository> Layer<S> for AuthLayer<U> {
    type Service = AuthMiddleware<S, U>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            auth: Arc::clone(&self.auth),
        }
    }
}

/// The context-resolving service produced by [`AuthLayer`].
pub struct AuthMiddleware<S, U: UserRepository> {
    inner: S,
    auth: Arc<AuthService<U>>,
}

impl<S: Clone, U: UserRepository> Clone for AuthMiddleware<S, U> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            auth: Arc::clone(&self.auth),
        }
    }
}

/// Header value as text; non-UTF-8 values count as malformed.
fn authorization_header(req: &Request<Body>) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?;
    match value.to_str() {
        Ok(s) => Some(s.to_string()),
        Err(_) => {
            tracing::debug!("Non-ASCII Authorization header, treating as anonymous");
            None
        }
    }
}

impl<S, U> Service<Request<Body>> for AuthMiddleware<S, U>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
    U: UserRepository + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let auth = Arc::clone(&self.auth);
        // Take the service that was driven to readiness, leave a fresh clone
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let header = authorization_header(&req);

            match auth.resolve_context(header.as_deref()).await {
                Ok(context) => {
                    req.extensions_mut().insert(AuthContextExt(context));
                    inner.call(req).await
                }
                Err(err) => {
                    tracing::debug!(error = %err, "Request rejected during authentication");
                    Ok(AuthRejection(err).into_response())
                }
            }
        })
    }
}
