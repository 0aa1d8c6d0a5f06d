//! Stored record models
//!
//! Rows carry everything the store keeps, including the password digest.
//! Convert to the outward [`User`] before handing a record to request code.

use chrono::{DateTime, Utc};
use shelf_types::{PasswordDigest, User, UserId};
use uuid::Uuid;

/// User row as kept by the store
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub favourite_genre: String,
    pub password: PasswordDigest,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Typed user ID
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            username: row.username,
            favourite_genre: row.favourite_genre,
        }
    }
}

/// Book row; the author is referenced by ID and resolved on read
#[derive(Debug, Clone)]
pub struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub published: i32,
    pub author_id: Uuid,
    pub genres: Vec<String>,
    pub created_at: DateTime<Utc>,
}
