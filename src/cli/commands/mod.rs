//! Command implementations.

pub mod completions;
pub mod hash_password;
pub mod migrate;
pub mod serve;
pub mod version;
