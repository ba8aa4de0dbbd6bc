//! Server configuration.
//!
//! Flags and environment variables are merged by clap (flag wins over env,
//! env over default). This module turns the merged values into a
//! [`ServerConfig`] and resolves where the database lives.
//!
//! # Database location
//!
//! - `--db` / `BUCKETLIST_DB` when given
//! - `~/.bucketlist/test/bucketlist.db` when `BUCKETLIST_TEST_DB=1`
//! - `~/.bucketlist/data/bucketlist.db` otherwise

use crate::error::{Error, Result};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BIND: &str = "127.0.0.1:3001";

/// Used when `JWT_SECRET` is unset. Fine for local use only.
pub const DEFAULT_JWT_SECRET: &str = "bucketlist-dev-secret-change-me";

const DB_FILE_NAME: &str = "bucketlist.db";

/// Everything `serve` needs, fully resolved.
#[derive(Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub api_key: Option<String>,
    pub pool_size: usize,
    pub acquire_timeout: Duration,
}

impl ServerConfig {
    #[must_use]
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("db_path", &self.db_path)
            .field("jwt_secret", &"<redacted>")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("pool_size", &self.pool_size)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

/// Parse a `HOST:PORT` bind address.
///
/// # Errors
///
/// Returns `Config` if the address does not parse.
pub fn parse_bind(raw: &str) -> Result<SocketAddr> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("invalid bind address: {raw}")))
}

/// `~/.bucketlist/`
#[must_use]
pub fn global_bucketlist_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".bucketlist"))
}

/// True when `BUCKETLIST_TEST_DB` is set to anything but `0`/`false`.
#[must_use]
pub fn is_test_mode() -> bool {
    std::env::var("BUCKETLIST_TEST_DB")
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

/// `~/.bucketlist/test/bucketlist.db`
#[must_use]
pub fn test_db_path() -> Option<PathBuf> {
    global_bucketlist_dir().map(|dir| dir.join("test").join(DB_FILE_NAME))
}

/// Resolve the database path.
///
/// An explicit path (from `--db` or `BUCKETLIST_DB`) wins; then test
/// mode; then the home-directory default.
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path.to_path_buf());
    }

    if is_test_mode() {
        return test_db_path();
    }

    global_bucketlist_dir().map(|dir| dir.join("data").join(DB_FILE_NAME))
}

/// Like [`resolve_db_path`], but creates the parent directory.
///
/// # Errors
///
/// Returns `DatabasePath` when no location can be determined or the
/// parent directory cannot be created.
pub fn prepare_db_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    let path = resolve_db_path(explicit_path).ok_or_else(|| Error::DatabasePath {
        path: PathBuf::from("~/.bucketlist/data").join(DB_FILE_NAME),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|_| Error::DatabasePath { path: path.clone() })?;
    }
    Ok(path)
}
