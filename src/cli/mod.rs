//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Bucket list API server
#[derive(Parser, Debug)]
#[command(name = "bucketlist", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.bucketlist/data/bucketlist.db)
    #[arg(long, global = true, env = "BUCKETLIST_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),

    /// Create or upgrade the database schema, then exit
    Migrate,

    /// Print an Argon2 hash for a password
    HashPassword {
        /// Plain-text password
        password: String,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "BUCKETLIST_BIND", default_value = crate::config::DEFAULT_BIND)]
    pub bind: String,

    /// Secret used to sign bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Require this value in the X-API-Key header
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Maximum open database connections
    #[arg(long, env = "BUCKETLIST_POOL_SIZE", default_value_t = crate::storage::pool::DEFAULT_POOL_SIZE)]
    pub pool_size: usize,

    /// How long a request waits for a connection, in milliseconds
    #[arg(long, env = "BUCKETLIST_ACQUIRE_TIMEOUT_MS", default_value_t = 2_000)]
    pub acquire_timeout_ms: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
