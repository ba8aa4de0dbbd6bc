//! Bucket list backend.
//!
//! A small REST service for personal goal lists: accounts, per-user items
//! split into this year's goals and someday items, drag-and-drop
//! reordering and a yearly archive of completed goals.
//!
//! # Architecture
//!
//! - [`server`] - axum router, handlers and middleware
//! - [`auth`] - password hashing and bearer tokens
//! - [`storage`] - SQLite schema, migrations, store and connection pool
//! - [`ordering`] - reorder/move computation for drag-and-drop clients
//! - [`model`] - Data types (`BucketItem`, `User`, patches)
//! - [`validate`] - Input validation
//! - [`config`] - Server configuration
//! - [`cli`] - Command-line interface using clap
//! - [`clock`] - Injectable wall clock
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod ordering;
pub mod server;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};
