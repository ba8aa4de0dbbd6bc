//! SQLite storage layer.
//!
//! This module provides the persistence layer using SQLite with:
//! - WAL mode for concurrent reads
//! - Transaction discipline for atomic writes
//! - Audit events for history
//! - A bounded connection pool for the HTTP server
//!
//! # Submodules
//!
//! - [`events`] - Audit event storage
//! - [`migrations`] - Versioned schema changes
//! - [`pool`] - Connection pool with scoped checkout
//! - [`schema`] - Database schema definitions
//! - [`sqlite`] - Main SQLite storage implementation

pub mod events;
pub mod migrations;
pub mod pool;
pub mod schema;
pub mod sqlite;

pub use pool::{ConnectionPool, PooledStorage};
pub use sqlite::{ArchiveOutcome, MutationContext, SqliteStorage};
