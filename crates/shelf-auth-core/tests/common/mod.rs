//! Common test utilities for shelf-auth-core integration tests

use shelf_auth_core::{AuthConfig, AuthService, NewUser};
use shelf_db::MemoryUserRepository;
use shelf_types::User;
use std::sync::Arc;
use std::time::Duration;

/// Per-run secret so no test depends on a shared constant
#[allow(dead_code)]
pub fn test_secret() -> String {
    format!("test-secret-{}", uuid::Uuid::new_v4())
}

/// Auth service over a fresh in-memory user store
#[allow(dead_code)]
pub fn test_service(
    lifetime: Duration,
) -> (AuthService<MemoryUserRepository>, Arc<MemoryUserRepository>) {
    let config = AuthConfig::try_new(test_secret())
        .expect("test secret is long enough")
        .with_token_lifetime(lifetime);
    let users = Arc::new(MemoryUserRepository::new());
    let service = AuthService::new(config, Arc::clone(&users)).expect("valid config");
    (service, users)
}

/// Register the canonical test user
#[allow(dead_code)]
pub async fn register_user(
    service: &AuthService<MemoryUserRepository>,
    username: &str,
    password: &str,
) -> User {
    service
        .register(NewUser {
            username: username.to_string(),
            password: password.to_string(),
            favourite_genre: "refactoring".to_string(),
        })
        .await
        .expect("registration succeeds")
}
