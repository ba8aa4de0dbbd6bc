//! Run the HTTP API.

use crate::cli::ServeArgs;
use crate::config::{parse_bind, prepare_db_path, ServerConfig, DEFAULT_JWT_SECRET};
use crate::error::{Error, Result};
use crate::server;
use std::path::Path;
use std::time::Duration;

/// Merge CLI/env values into a [`ServerConfig`].
///
/// # Errors
///
/// Returns `Config` for a bad bind address or zero pool size, or
/// `DatabasePath` if the database directory cannot be created.
pub fn resolve_config(args: &ServeArgs, db: Option<&Path>) -> Result<ServerConfig> {
    if args.pool_size == 0 {
        return Err(Error::Config("pool size must be at least 1".to_string()));
    }

    let jwt_secret = args
        .jwt_secret
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

    Ok(ServerConfig {
        bind: parse_bind(&args.bind)?,
        db_path: prepare_db_path(db)?,
        jwt_secret,
        api_key: args.api_key.clone().filter(|k| !k.is_empty()),
        pool_size: args.pool_size,
        acquire_timeout: Duration::from_millis(args.acquire_timeout_ms),
    })
}

/// Execute the serve command. Blocks until shutdown.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the runtime cannot
/// start, or the server fails.
pub fn execute(args: &ServeArgs, db: Option<&Path>) -> Result<()> {
    let config = resolve_config(args, db)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(&config))
}
