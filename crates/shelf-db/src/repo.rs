//! Repository traits
//!
//! Define async repository interfaces for the document store.

use async_trait::async_trait;
use shelf_types::{Author, Book, PasswordDigest};
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user. Fails with `Conflict` if the username is taken.
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Delete a user
    async fn delete(&self, id: Uuid) -> DbResult<()>;
}

/// Create user input
///
/// The password arrives already hashed; plaintext never reaches the store.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub username: String,
    pub favourite_genre: String,
    pub password: PasswordDigest,
}

/// Catalog repository trait
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Find an author by exact name
    async fn find_author_by_name(&self, name: &str) -> DbResult<Option<Author>>;

    /// List all authors
    async fn list_authors(&self) -> DbResult<Vec<Author>>;

    /// Create a new author
    async fn create_author(&self, author: CreateAuthor) -> DbResult<Author>;

    /// Set an author's birth year, returning the updated record
    async fn update_author_born(&self, name: &str, born: i32) -> DbResult<Option<Author>>;

    /// List books matching the filter, authors resolved
    async fn list_books(&self, filter: &BookFilter) -> DbResult<Vec<Book>>;

    /// First book matching the filter in listing order
    async fn find_book(&self, filter: &BookFilter) -> DbResult<Option<Book>>;

    /// Create a new book
    async fn create_book(&self, book: CreateBook) -> DbResult<Book>;

    /// Number of stored books
    async fn count_books(&self) -> DbResult<u64>;

    /// Number of stored authors
    async fn count_authors(&self) -> DbResult<u64>;
}

/// Create author input
#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub id: Uuid,
    pub name: String,
    pub born: Option<i32>,
}

/// Create book input
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub id: Uuid,
    pub title: String,
    pub published: i32,
    pub author_id: Uuid,
    pub genres: Vec<String>,
}

/// Book query filter; `None` fields match everything
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}
