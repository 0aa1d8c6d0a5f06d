//! Configuration for the library API service.

use shelf_auth_core::AuthConfig;
use std::time::Duration;

/// Library API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Auth core configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_port = lookup("HTTP_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Signing secret (minimum 32 bytes, checked by AuthConfig)
        let token_secret = lookup("TOKEN_SECRET").ok_or(ConfigError::Missing("TOKEN_SECRET"))?;

        let issuer = lookup("TOKEN_ISSUER")
            .unwrap_or_else(|| shelf_auth_core::DEFAULT_ISSUER.to_string());

        // Token lifetime (default 24 hours)
        let lifetime_hours: u64 = lookup("TOKEN_LIFETIME_HOURS")
            .unwrap_or_else(|| "24".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_LIFETIME_HOURS"))?;

        if lifetime_hours == 0 {
            return Err(ConfigError::Invalid("TOKEN_LIFETIME_HOURS must be positive"));
        }

        let auth = AuthConfig::try_new(token_secret)
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?
            .with_issuer(issuer)
            .with_token_lifetime(Duration::from_secs(lifetime_hours.saturating_mul(3600)));

        Ok(Self { http_port, auth })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
