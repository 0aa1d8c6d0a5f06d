//! Shelf Auth Core - Authentication business logic
//!
//! Password verification, signed bearer tokens, per-request context
//! resolution, and the authorization gate for protected operations.

pub mod config;
pub mod context;
pub mod error;
pub mod key;
pub mod resolver;
pub mod service;
pub mod session;
pub mod token;

pub use config::*;
pub use context::*;
pub use error::*;
pub use key::{SigningKey, SigningKeyError};
pub use resolver::{bearer_token, ContextResolver};
pub use service::*;
pub use session::SessionVerifier;
pub use token::{Claims, IssuedToken, TokenCodec};

pub use shelf_types::PasswordDigest;
