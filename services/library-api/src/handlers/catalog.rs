//! Catalog handlers (books and authors)
//!
//! Reads are open to everyone. `add_book` and `edit_author` take
//! [`RequireAuth`] as their first extractor, so an anonymous request is
//! rejected before the body is parsed or the store is touched.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shelf_axum::RequireAuth;
use shelf_db::{BookFilter, CatalogRepository, CreateAuthor, CreateBook, DbError};
use shelf_types::{Author, Book};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Shortest author name accepted in a book query
const MIN_AUTHOR_FILTER_LEN: usize = 4;

/// Shortest genre accepted in a book query
const MIN_GENRE_FILTER_LEN: usize = 3;

/// Shortest title accepted in a book lookup
const MIN_TITLE_FILTER_LEN: usize = 2;

/// Shortest name accepted in an author lookup
const MIN_AUTHOR_NAME_LEN: usize = 3;

fn check_min_len(value: Option<&str>, min: usize, message: &str) -> ApiResult<()> {
    match value {
        Some(v) if v.chars().count() < min => Err(ApiError::BadRequest(message.to_string())),
        _ => Ok(()),
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct BooksQuery {
    pub author: Option<String>,
    pub genre: Option<String>,
}

impl BooksQuery {
    fn into_filter(self) -> ApiResult<BookFilter> {
        check_min_len(
            self.author.as_deref(),
            MIN_AUTHOR_FILTER_LEN,
            "author name should not be that short",
        )?;
        check_min_len(
            self.genre.as_deref(),
            MIN_GENRE_FILTER_LEN,
            "genre should not be that short",
        )?;
        Ok(BookFilter {
            title: None,
            author: self.author,
            genre: self.genre,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FindBookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl FindBookQuery {
    fn into_filter(self) -> ApiResult<BookFilter> {
        check_min_len(
            self.title.as_deref(),
            MIN_TITLE_FILTER_LEN,
            "title should not be that short",
        )?;
        check_min_len(
            self.author.as_deref(),
            MIN_AUTHOR_FILTER_LEN,
            "author name should not be that short",
        )?;
        Ok(BookFilter {
            title: self.title,
            author: self.author,
            genre: None,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FindAuthorQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    #[serde(flatten)]
    pub author: Author,
    pub book_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    pub title: String,
    pub author: String,
    pub published: i32,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAuthorRequest {
    pub set_born_to: i32,
}

// ============================================================================
// Queries
// ============================================================================

/// GET /api/v1/books?author=&genre=
pub async fn all_books(
    State(state): State<AppState>,
    Query(query): Query<BooksQuery>,
) -> ApiResult<Json<Vec<Book>>> {
    let filter = query.into_filter()?;
    Ok(Json(state.catalog.list_books(&filter).await?))
}

/// GET /api/v1/books/find?title=&author=
///
/// First matching book, or `null`.
pub async fn find_book(
    State(state): State<AppState>,
    Query(query): Query<FindBookQuery>,
) -> ApiResult<Json<Option<Book>>> {
    let filter = query.into_filter()?;
    Ok(Json(state.catalog.find_book(&filter).await?))
}

/// GET /api/v1/books/count
pub async fn count_books(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.catalog.count_books().await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/v1/authors
pub async fn all_authors(State(state): State<AppState>) -> ApiResult<Json<Vec<AuthorSummary>>> {
    let books = state.catalog.list_books(&BookFilter::default()).await?;
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for book in &books {
        *counts.entry(book.author.id).or_default() += 1;
    }

    let authors = state
        .catalog
        .list_authors()
        .await?
        .into_iter()
        .map(|author| AuthorSummary {
            book_count: counts.get(&author.id).copied().unwrap_or(0),
            author,
        })
        .collect();

    Ok(Json(authors))
}

/// GET /api/v1/authors/find?name=
///
/// The author with exactly that name, or `null`.
pub async fn find_author(
    State(state): State<AppState>,
    Query(query): Query<FindAuthorQuery>,
) -> ApiResult<Json<Option<Author>>> {
    let name = query
        .name
        .ok_or_else(|| ApiError::BadRequest("name is required".to_string()))?;
    check_min_len(
        Some(name.as_str()),
        MIN_AUTHOR_NAME_LEN,
        "name should not be that short",
    )?;
    Ok(Json(state.catalog.find_author_by_name(&name).await?))
}

/// GET /api/v1/authors/count
pub async fn count_authors(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.catalog.count_authors().await?;
    Ok(Json(CountResponse { count }))
}

// ============================================================================
// Protected mutations
// ============================================================================

/// POST /api/v1/books
///
/// Creates the author first when no author with that name exists.
pub async fn add_book(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<AddBookRequest>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }
    if req.author.trim().is_empty() {
        return Err(ApiError::BadRequest("author is required".to_string()));
    }

    let author = find_or_create_author(&state, &req.author).await?;
    let book = state
        .catalog
        .create_book(CreateBook {
            id: Uuid::new_v4(),
            title: req.title,
            published: req.published,
            author_id: author.id,
            genres: req.genres,
        })
        .await?;

    tracing::info!(user_id = %user.id, book_id = %book.id, "Book added");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn find_or_create_author(state: &AppState, name: &str) -> ApiResult<Author> {
    if let Some(author) = state.catalog.find_author_by_name(name).await? {
        return Ok(author);
    }

    let created = state
        .catalog
        .create_author(CreateAuthor {
            id: Uuid::new_v4(),
            name: name.to_string(),
            born: None,
        })
        .await;

    match created {
        Ok(author) => Ok(author),
        // Another request created it between our lookup and insert
        Err(DbError::Conflict(_)) => state
            .catalog
            .find_author_by_name(name)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("author {name}"))),
        Err(e) => Err(e.into()),
    }
}

/// PUT /api/v1/authors/:name/born
///
/// Returns the updated author, or `null` when no author has that name.
pub async fn edit_author(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<EditAuthorRequest>,
) -> ApiResult<Json<Option<Author>>> {
    let updated = state
        .catalog
        .update_author_born(&name, req.set_born_to)
        .await?;

    if updated.is_some() {
        tracing::info!(user_id = %user.id, author = %name, "Author birth year updated");
    }
    Ok(Json(updated))
}
