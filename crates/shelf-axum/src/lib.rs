//! Shelf Axum Integration
//!
//! Axum middleware and extractors wiring `shelf-auth-core` into HTTP
//! services.
//!
//! # Overview
//!
//! - **Middleware**: [`AuthLayer`] resolves the auth context once per request
//! - **Extractors**: [`RequireAuth`] (authorization gate), [`MaybeAuth`]
//! - **Errors**: [`AuthRejection`] renders auth failures as JSON responses
//!
//! # Quick Start
//!
//! ```ignore
//! use shelf_axum::{AuthLayer, RequireAuth};
//! use axum::{Router, routing::post};
//!
//! async fn add_book(RequireAuth(user): RequireAuth) -> String {
//!     format!("Hello, {}!", user.username)
//! }
//!
//! let app = Router::new()
//!     .route("/api/v1/books", post(add_book))
//!     .layer(AuthLayer::new(auth_service));
//! ```

pub mod error;
pub mod extractors;
pub mod layer;

pub use error::{AuthRejection, ErrorDetail, ErrorResponse};
pub use extractors::{AuthContextExt, MaybeAuth, RequireAuth};
pub use layer::{AuthLayer, AuthMiddleware};
