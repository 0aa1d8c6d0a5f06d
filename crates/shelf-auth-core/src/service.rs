//! Auth service - ties together password checks, token issuance, and
//! per-request context resolution

use chrono::Utc;
use shelf_db::{CreateUser, DbError, UserRepository};
use shelf_types::{PasswordDigest, User, UserId};
use std::sync::Arc;

use crate::{
    config::AuthConfig,
    context::AuthContext,
    resolver::ContextResolver,
    session::SessionVerifier,
    token::{Claims, IssuedToken, TokenCodec},
    AuthError,
};

/// Registration input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub favourite_genre: String,
}

/// Authentication service
///
/// Provides unified interface for:
/// - User registration (password hashed before it reaches the store)
/// - Login and token issuance
/// - Token verification and request context resolution
pub struct AuthService<U: UserRepository> {
    config: AuthConfig,
    codec: TokenCodec,
    verifier: SessionVerifier,
    resolver: ContextResolver<U>,
    user_repo: Arc<U>,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new auth service
    pub fn new(config: AuthConfig, user_repo: Arc<U>) -> Result<Self, AuthError> {
        let codec = TokenCodec::from_config(&config)?;
        let verifier = SessionVerifier::new(codec.clone());

        Ok(Self {
            resolver: ContextResolver::new(verifier.clone(), Arc::clone(&user_repo)),
            verifier,
            codec,
            user_repo,
            config,
        })
    }

    /// Service configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Register a new user
    pub async fn register(&self, new_user: NewUser) -> Result<User, AuthError> {
        if new_user.username.trim().is_empty() {
            return Err(AuthError::InvalidInput("username is required".to_string()));
        }
        if new_user.favourite_genre.trim().is_empty() {
            return Err(AuthError::InvalidInput(
                "favourite genre is required".to_string(),
            ));
        }

        if self
            .user_repo
            .find_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameTaken(new_user.username));
        }

        let username = new_user.username.clone();
        let create = CreateUser {
            id: uuid::Uuid::new_v4(),
            password: PasswordDigest::hash(&new_user.password),
            username: new_user.username,
            favourite_genre: new_user.favourite_genre,
        };

        let row = self.user_repo.create(create).await.map_err(|e| match e {
            // Lost a race with a concurrent registration
            DbError::Conflict(_) => AuthError::UsernameTaken(username),
            other => AuthError::from(other),
        })?;

        tracing::info!(user_id = %row.id, "User registered");
        Ok(row.into())
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    /// Check a username/password pair and issue a token.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let user = self.user_repo.find_by_username(username).await?;

        match user {
            Some(user) if user.password.matches(password) => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                self.issue_token(user.user_id())
            }
            _ => {
                tracing::debug!("Login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Issue a token for a subject, valid for the configured lifetime
    pub fn issue_token(&self, subject: UserId) -> Result<IssuedToken, AuthError> {
        let claims = Claims::new(
            subject,
            self.config.issuer.clone(),
            Utc::now(),
            self.config.token_lifetime,
        );
        let value = self.codec.encode(&claims)?;
        Ok(IssuedToken { value })
    }

    /// Verify a bare token and return its subject
    pub fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        self.verifier.verify(token)
    }

    /// Resolve the `Authorization` header of one request
    pub async fn resolve_context(&self, header: Option<&str>) -> Result<AuthContext, AuthError> {
        self.resolver.resolve(header).await
    }
}

impl<U: UserRepository> std::fmt::Debug for AuthService<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .finish()
    }
}
