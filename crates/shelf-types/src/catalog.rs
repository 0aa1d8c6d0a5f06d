//! Catalog types (authors and books)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Book author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    /// Birth year, if known
    pub born: Option<i32>,
}

/// Book with its author resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub published: i32,
    pub author: Author,
    pub genres: Vec<String>,
}
