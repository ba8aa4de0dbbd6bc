//! Bounded pool of SQLite connections on top of `deadpool`.
//!
//! Each pooled object is a [`SqliteStorage`]. A checked-out
//! [`PooledStorage`] goes back to the pool when it is dropped, so every
//! exit path of a request releases it.

use crate::error::{Error, Result};
use crate::storage::sqlite::SqliteStorage;
use deadpool::managed::{self, Metrics, PoolError, RecycleError, RecycleResult};
use deadpool::Runtime;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_POOL_SIZE: usize = 8;
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Where new connections come from.
#[derive(Debug)]
enum Target {
    File(PathBuf),
    /// Each connection is its own database, so memory pools hold one.
    Memory,
}

/// Opens and recycles [`SqliteStorage`] connections.
#[derive(Debug)]
pub struct StorageManager {
    target: Target,
}

impl managed::Manager for StorageManager {
    type Type = SqliteStorage;
    type Error = Error;

    async fn create(&self) -> Result<SqliteStorage> {
        match &self.target {
            Target::File(path) => {
                debug!(path = %path.display(), "Opening pooled connection");
                SqliteStorage::connect(path, None)
            }
            Target::Memory => SqliteStorage::open_memory(),
        }
    }

    async fn recycle(&self, storage: &mut SqliteStorage, _: &Metrics) -> RecycleResult<Error> {
        if storage.conn().is_autocommit() {
            Ok(())
        } else {
            Err(RecycleError::Backend(Error::Other(
                "connection returned with an open transaction".to_string(),
            )))
        }
    }
}

/// A checked-out connection. Dereferences to [`SqliteStorage`].
pub type PooledStorage = managed::Object<StorageManager>;

/// Cloneable handle to a shared connection pool.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: managed::Pool<StorageManager>,
}

impl ConnectionPool {
    /// Open a pool over a database file.
    ///
    /// The schema is applied once up front, so a bad path or failing
    /// migration surfaces at startup. Pooled connections are opened on
    /// demand up to `size`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path, size: usize, acquire_timeout: Duration) -> Result<Self> {
        drop(SqliteStorage::open(path)?);
        let pool = Self::build(Target::File(path.to_path_buf()), size.max(1), acquire_timeout)?;
        debug!(path = %path.display(), size = pool.size(), "Connection pool opened");
        Ok(pool)
    }

    /// A pool holding one in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built.
    pub fn open_memory(acquire_timeout: Duration) -> Result<Self> {
        Self::build(Target::Memory, 1, acquire_timeout)
    }

    fn build(target: Target, size: usize, acquire_timeout: Duration) -> Result<Self> {
        let inner = managed::Pool::builder(StorageManager { target })
            .max_size(size)
            .wait_timeout(Some(acquire_timeout))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| Error::Config(format!("connection pool: {e}")))?;
        Ok(Self { inner })
    }

    /// Upper bound of simultaneously checked-out connections.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.status().max_size
    }

    /// Check out a connection, waiting up to the acquire timeout.
    ///
    /// # Errors
    ///
    /// Returns `PoolTimeout` if no connection frees up in time, or the
    /// error from opening a new connection.
    pub async fn acquire(&self) -> Result<PooledStorage> {
        self.inner.get().await.map_err(|e| match e {
            PoolError::Timeout(_) => {
                warn!(size = self.size(), "Timed out acquiring a database connection");
                Error::PoolTimeout
            }
            PoolError::Backend(e) => e,
            other => Error::Other(format!("connection pool: {other}")),
        })
    }
}

impl std::fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.inner.status();
        f.debug_struct("ConnectionPool")
            .field("max_size", &status.max_size)
            .field("size", &status.size)
            .finish_non_exhaustive()
    }
}
