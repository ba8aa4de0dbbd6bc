//! HTTP API.
//!
//! # Submodules
//!
//! - [`extract`] - bearer-token user and JSON body extractors
//! - [`handlers`] - route handlers
//! - [`middleware`] - API key gate and request logging
//! - [`response`] - `{ "error" }` rendering
//! - [`router`] - route table
//! - [`state`] - shared handler state

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;

use crate::auth::TokenIssuer;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::storage::ConnectionPool;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Open the database, bind and serve until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the address
/// cannot be bound.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    if config.uses_default_jwt_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }

    let pool = ConnectionPool::open(&config.db_path, config.pool_size, config.acquire_timeout)?;
    let mut state = AppState::new(pool, TokenIssuer::new(config.jwt_secret.as_bytes()));
    if let Some(key) = &config.api_key {
        state = state.with_api_key(key);
    }

    let listener = TcpListener::bind(config.bind).await?;
    info!(
        bind = %listener.local_addr()?,
        db = %config.db_path.display(),
        pool_size = config.pool_size,
        api_key = config.api_key.is_some(),
        "Server listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
