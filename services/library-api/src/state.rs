//! Application state

use std::sync::Arc;

use shelf_auth_core::AuthService;
use shelf_db::{MemoryCatalogRepository, MemoryUserRepository};

use crate::config::Config;

/// Auth service over the in-memory user store
pub type AuthServiceImpl = AuthService<MemoryUserRepository>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth service for login, registration and context resolution
    pub auth: Arc<AuthServiceImpl>,
    /// Book and author store
    pub catalog: Arc<MemoryCatalogRepository>,
}

impl AppState {
    /// Build state with fresh in-memory stores
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let users = Arc::new(MemoryUserRepository::new());
        let auth = AuthService::new(config.auth, users)?;

        Ok(Self {
            auth: Arc::new(auth),
            catalog: Arc::new(MemoryCatalogRepository::new()),
        })
    }
}
