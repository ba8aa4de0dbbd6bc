//! Route handlers, one module per resource.

pub mod archive;
pub mod auth;
pub mod health;
pub mod items;
