//! User handlers (registration, login, me)

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shelf_auth_core::{IssuedToken, NewUser};
use shelf_axum::MaybeAuth;
use shelf_types::User;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub favourite_genre: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state
        .auth
        .register(NewUser {
            username: req.username,
            password: req.password,
            favourite_genre: req.favourite_genre,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/login
///
/// Returns `{ "value": "<token>" }` on success.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<IssuedToken>> {
    let token = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(token))
}

/// GET /api/v1/me
///
/// The current user, or `null` for anonymous callers.
pub async fn me(MaybeAuth(ctx): MaybeAuth) -> Json<Option<User>> {
    Json(ctx.user().cloned())
}
