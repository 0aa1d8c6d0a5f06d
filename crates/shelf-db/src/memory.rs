//! In-memory repositories
//!
//! `DashMap`-backed implementations of the repository traits. Used by the
//! service binary when no external store is configured, and by tests.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shelf_types::{Author, Book};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{BookRow, UserRow};
use crate::repo::{
    BookFilter, CatalogRepository, CreateAuthor, CreateBook, CreateUser, UserRepository,
};

/// In-memory user repository
#[derive(Default, Clone)]
pub struct MemoryUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_username: Arc<DashMap<String, Uuid>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_username
            .get(username)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        // Claim the username first so concurrent creates cannot both succeed
        match self.by_username.entry(user.username.clone()) {
            Entry::Occupied(_) => {
                return Err(DbError::Conflict(format!(
                    "username {} already exists",
                    user.username
                )))
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }

        let row = UserRow {
            id: user.id,
            username: user.username,
            favourite_genre: user.favourite_genre,
            password: user.password,
            created_at: Utc::now(),
        };
        self.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        if let Some((_, user)) = self.users.remove(&id) {
            self.by_username.remove(&user.username);
        }
        Ok(())
    }
}

/// In-memory catalog repository
#[derive(Default, Clone)]
pub struct MemoryCatalogRepository {
    authors: Arc<DashMap<Uuid, Author>>,
    authors_by_name: Arc<DashMap<String, Uuid>>,
    books: Arc<DashMap<Uuid, BookRow>>,
}

impl MemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(&self, row: &BookRow) -> DbResult<Book> {
        let author = self
            .authors
            .get(&row.author_id)
            .map(|a| a.value().clone())
            .ok_or(DbError::NotFound)?;
        Ok(Book {
            id: row.id,
            title: row.title.clone(),
            published: row.published,
            author,
            genres: row.genres.clone(),
        })
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn find_author_by_name(&self, name: &str) -> DbResult<Option<Author>> {
        Ok(self
            .authors_by_name
            .get(name)
            .and_then(|id| self.authors.get(id.value()).map(|a| a.value().clone())))
    }

    async fn list_authors(&self) -> DbResult<Vec<Author>> {
        let mut authors: Vec<Author> = self.authors.iter().map(|a| a.value().clone()).collect();
        authors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(authors)
    }

    async fn create_author(&self, author: CreateAuthor) -> DbResult<Author> {
        match self.authors_by_name.entry(author.name.clone()) {
            Entry::Occupied(_) => {
                return Err(DbError::Conflict(format!(
                    "author {} already exists",
                    author.name
                )))
            }
            Entry::Vacant(slot) => {
                slot.insert(author.id);
            }
        }

        let author = Author {
            id: author.id,
            name: author.name,
            born: author.born,
        };
        self.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn update_author_born(&self, name: &str, born: i32) -> DbResult<Option<Author>> {
        let Some(id) = self.authors_by_name.get(name).map(|id| *id.value()) else {
            return Ok(None);
        };
        Ok(self.authors.get_mut(&id).map(|mut author| {
            author.born = Some(born);
            author.clone()
        }))
    }

    async fn list_books(&self, filter: &BookFilter) -> DbResult<Vec<Book>> {
        let author_id = match &filter.author {
            Some(name) => match self.authors_by_name.get(name) {
                Some(id) => Some(*id.value()),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let mut rows: Vec<BookRow> = self
            .books
            .iter()
            .filter(|r| author_id.map_or(true, |id| r.author_id == id))
            .filter(|r| filter.title.as_ref().map_or(true, |t| &r.title == t))
            .filter(|r| {
                filter
                    .genre
                    .as_ref()
                    .map_or(true, |g| r.genres.iter().any(|genre| genre == g))
            })
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.title.cmp(&b.title)));

        rows.iter().map(|row| self.resolve(row)).collect()
    }

    async fn find_book(&self, filter: &BookFilter) -> DbResult<Option<Book>> {
        Ok(self.list_books(filter).await?.into_iter().next())
    }

    async fn create_book(&self, book: CreateBook) -> DbResult<Book> {
        if !self.authors.contains_key(&book.author_id) {
            return Err(DbError::NotFound);
        }
        let row = BookRow {
            id: book.id,
            title: book.title,
            published: book.published,
            author_id: book.author_id,
            genres: book.genres,
            created_at: Utc::now(),
        };
        let resolved = self.resolve(&row)?;
        self.books.insert(row.id, row);
        Ok(resolved)
    }

    async fn count_books(&self) -> DbResult<u64> {
        Ok(self.books.len() as u64)
    }

    async fn count_authors(&self) -> DbResult<u64> {
        Ok(self.authors.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_types::PasswordDigest;

    fn new_user(username: &str) -> CreateUser {
        CreateUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
            favourite_genre: "refactoring".to_string(),
            password: PasswordDigest::hash("secret"),
        }
    }

    #[tokio::test]
    async fn test_user_repo_crud() {
        let repo = MemoryUserRepository::new();

        // Create
        let user = repo.create(new_user("mluukkai")).await.unwrap();
        assert!(user.password.matches("secret"));

        // Find by ID
        let found = repo.find_by_id(user.id).await.unwrap();
        assert_eq!(found.unwrap().username, "mluukkai");

        // Find by username
        let found = repo.find_by_username("mluukkai").await.unwrap();
        assert!(found.is_some());
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());

        // Delete
        repo.delete(user.id).await.unwrap();
        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(repo.find_by_username("mluukkai").await.unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let repo = MemoryUserRepository::new();
        repo.create(new_user("dup")).await.unwrap();

        let result = repo.create(new_user("dup")).await;
        assert!(matches!(result, Err(DbError::Conflict(_))));
        assert_eq!(repo.len(), 1);
    }

    async fn seed_author(repo: &MemoryCatalogRepository, name: &str) -> Author {
        repo.create_author(CreateAuthor {
            id: Uuid::new_v4(),
            name: name.to_string(),
            born: None,
        })
        .await
        .unwrap()
    }

    async fn seed_book(repo: &MemoryCatalogRepository, title: &str, author: &Author, genres: &[&str]) {
        repo.create_book(CreateBook {
            id: Uuid::new_v4(),
            title: title.to_string(),
            published: 2008,
            author_id: author.id,
            genres: genres.iter().map(|g| g.to_string()).collect(),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_book_filters() {
        let repo = MemoryCatalogRepository::new();
        let martin = seed_author(&repo, "Robert Martin").await;
        let fowler = seed_author(&repo, "Martin Fowler").await;

        seed_book(&repo, "Clean Code", &martin, &["refactoring"]).await;
        seed_book(&repo, "Agile software development", &martin, &["agile", "design"]).await;
        seed_book(&repo, "Refactoring, edition 2", &fowler, &["refactoring"]).await;

        let all = repo.list_books(&BookFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let by_author = repo
            .list_books(&BookFilter {
                author: Some("Robert Martin".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_author.len(), 2);
        assert!(by_author.iter().all(|b| b.author.name == "Robert Martin"));

        let by_both = repo
            .list_books(&BookFilter {
                author: Some("Robert Martin".into()),
                genre: Some("refactoring".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_both.len(), 1);
        assert_eq!(by_both[0].title, "Clean Code");

        let unknown = repo
            .list_books(&BookFilter {
                author: Some("Nobody".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(unknown.is_empty());

        assert_eq!(repo.count_books().await.unwrap(), 3);
        assert_eq!(repo.count_authors().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_book() {
        let repo = MemoryCatalogRepository::new();
        let martin = seed_author(&repo, "Robert Martin").await;
        let kerievsky = seed_author(&repo, "Joshua Kerievsky").await;
        seed_book(&repo, "Clean Code", &martin, &["refactoring"]).await;
        seed_book(&repo, "Refactoring to patterns", &kerievsky, &["patterns"]).await;

        let found = repo
            .find_book(&BookFilter {
                title: Some("Clean Code".into()),
                ..Default::default()
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.author.name, "Robert Martin");

        let by_author = repo
            .find_book(&BookFilter {
                author: Some("Joshua Kerievsky".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_author.unwrap().title, "Refactoring to patterns");

        let mismatch = repo
            .find_book(&BookFilter {
                title: Some("Clean Code".into()),
                author: Some("Joshua Kerievsky".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(mismatch.is_none());
    }

    #[tokio::test]
    async fn test_update_author_born() {
        let repo = MemoryCatalogRepository::new();
        seed_author(&repo, "Sandi Metz").await;

        let updated = repo.update_author_born("Sandi Metz", 1960).await.unwrap();
        assert_eq!(updated.unwrap().born, Some(1960));

        let missing = repo.update_author_born("Nobody", 1900).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_create_book_requires_author() {
        let repo = MemoryCatalogRepository::new();
        let result = repo
            .create_book(CreateBook {
                id: Uuid::new_v4(),
                title: "Orphan".into(),
                published: 2000,
                author_id: Uuid::new_v4(),
                genres: vec![],
            })
            .await;
        assert!(matches!(result, Err(DbError::NotFound)));
        assert_eq!(repo.count_books().await.unwrap(), 0);
    }
}
