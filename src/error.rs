//! Error types for the bucket list service.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - HTTP status mapping for the REST surface
//! - Category-based exit codes for the CLI
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bucket list operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    DatabaseError,
    PoolTimeout,

    // Not Found (exit 3)
    ItemNotFound,
    RouteNotFound,

    // Validation (exit 4)
    InvalidArgument,

    // Auth (exit 5)
    Unauthorized,
    InvalidCredentials,
    EmailTaken,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::DatabaseError => "DATABASE_ERROR",
            Self::PoolTimeout => "POOL_TIMEOUT",
            Self::ItemNotFound => "ITEM_NOT_FOUND",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::DatabaseError | Self::PoolTimeout => 2,
            Self::ItemNotFound | Self::RouteNotFound => 3,
            Self::InvalidArgument => 4,
            Self::Unauthorized | Self::InvalidCredentials | Self::EmailTaken => 5,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// HTTP status code for the REST surface.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidArgument => 400,
            Self::Unauthorized | Self::InvalidCredentials => 401,
            Self::ItemNotFound | Self::RouteNotFound => 404,
            Self::EmailTaken => 409,
            Self::DatabaseError
            | Self::PoolTimeout
            | Self::ConfigError
            | Self::IoError
            | Self::JsonError
            | Self::InternalError => 500,
        }
    }

    /// Whether a client may retry the same request unchanged.
    ///
    /// Only transient contention qualifies; validation and auth
    /// failures need different input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::PoolTimeout | Self::DatabaseError)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in bucket list operations.
///
/// Client-facing variants render a message safe to return verbatim;
/// everything that maps to a 5xx is logged and replaced with a generic body.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken { email: String },

    #[error("Item not found")]
    ItemNotFound { id: i64 },

    #[error("Route not found")]
    RouteNotFound,

    #[error("Timed out waiting for a database connection")]
    PoolTimeout,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database path not available: {path}")]
    DatabasePath { path: PathBuf },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Unauthorized(_) => ErrorCode::Unauthorized,
            Self::InvalidCredentials => ErrorCode::InvalidCredentials,
            Self::EmailTaken { .. } => ErrorCode::EmailTaken,
            Self::ItemNotFound { .. } => ErrorCode::ItemNotFound,
            Self::RouteNotFound => ErrorCode::RouteNotFound,
            Self::PoolTimeout => ErrorCode::PoolTimeout,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Config(_) | Self::DatabasePath { .. } => ErrorCode::ConfigError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// HTTP status, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.error_code().http_status()
    }

    /// True for failures whose detail must not reach an HTTP client.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.http_status() >= 500
    }

    /// Message suitable for an HTTP response body.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    /// Context-aware recovery hint for CLI users.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::DatabasePath { path } => Some(format!(
                "Check that {} is writable or pass --db <path>.",
                path.display()
            )),
            Self::Config(msg) if msg.contains("bind") => {
                Some("Use --bind HOST:PORT, for example --bind 127.0.0.1:3001".to_string())
            }
            Self::PoolTimeout => {
                Some("Raise --pool-size or --acquire-timeout-ms if this persists.".to_string())
            }
            _ => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
