//! Router assembly

use axum::routing::{get, post, put};
use axum::Router;
use shelf_axum::AuthLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the application router.
///
/// Every route sits behind [`AuthLayer`]: a bearer token that fails
/// verification is rejected even on public routes.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users", post(handlers::create_user))
        .route("/login", post(handlers::login))
        .route("/me", get(handlers::me))
        .route("/books", get(handlers::all_books).post(handlers::add_book))
        .route("/books/find", get(handlers::find_book))
        .route("/books/count", get(handlers::count_books))
        .route("/authors", get(handlers::all_authors))
        .route("/authors/find", get(handlers::find_author))
        .route("/authors/count", get(handlers::count_authors))
        .route("/authors/:name/born", put(handlers::edit_author));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .layer(AuthLayer::new(state.auth.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
