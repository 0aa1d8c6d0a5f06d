//! Shelf DB - Store abstractions
//!
//! Repository traits for the user store and the book catalog, plus
//! in-memory implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_db::{MemoryUserRepository, UserRepository};
//!
//! let users = MemoryUserRepository::new();
//! let user = users.find_by_username("mluukkai").await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repo;

pub use error::{DbError, DbResult};
pub use memory::{MemoryCatalogRepository, MemoryUserRepository};
pub use models::*;
pub use repo::*;
