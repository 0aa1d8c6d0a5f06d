//! Shelf Types - Shared domain types
//!
//! This crate contains domain types used across Shelf crates:
//! - User identity and the outward user shape
//! - Password digests
//! - Catalog records (authors, books)

pub mod catalog;
pub mod password;
pub mod user;

pub use catalog::*;
pub use password::*;
pub use user::*;
