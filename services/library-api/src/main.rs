//! Library API
//!
//! HTTP catalog of books and authors. Reads are public; adding books and
//! editing authors require a bearer token obtained from `/api/v1/login`.

mod config;
mod error;
mod handlers;
mod routes;
mod state;

use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        issuer = %config.auth.issuer,
        token_lifetime_secs = config.auth.token_lifetime.as_secs(),
        "Starting Library API"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(config)?;
    let app = routes::router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
