//! Account signup, login and bearer tokens.
//!
//! # Submodules
//!
//! - [`password`] - Argon2id hashing
//! - [`token`] - HS256 bearer tokens

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer, TOKEN_TTL_DAYS};

use crate::error::{Error, Result};
use crate::model::PublicUser;
use crate::storage::SqliteStorage;
use crate::validate::{normalize_email, normalize_full_name, validate_password};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Body returned by signup and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Register a user and sign them in.
///
/// # Errors
///
/// Returns `InvalidArgument` for a malformed email or short password and
/// `EmailTaken` if the address is already registered.
pub fn signup(
    storage: &mut SqliteStorage,
    tokens: &TokenIssuer,
    email: &str,
    password: &str,
    full_name: Option<String>,
    now: DateTime<Utc>,
) -> Result<AuthResponse> {
    let email = normalize_email(email)?;
    validate_password(password)?;
    let full_name = normalize_full_name(full_name);

    let password_hash = hash_password(password)?;
    let user = storage.create_user(&email, &password_hash, full_name.as_deref(), now)?;
    info!(user_id = user.id, "User signed up");

    Ok(AuthResponse {
        token: tokens.issue(user.id, now)?,
        user: user.public(),
    })
}

/// Check credentials and issue a token.
///
/// Unknown email, malformed email and wrong password all produce the
/// same `InvalidCredentials` error.
///
/// # Errors
///
/// Returns `InvalidCredentials` on any mismatch.
pub fn login(
    storage: &SqliteStorage,
    tokens: &TokenIssuer,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<AuthResponse> {
    let email = normalize_email(email).map_err(|_| Error::InvalidCredentials)?;
    let user = storage
        .get_user_by_email(&email)?
        .ok_or(Error::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(Error::InvalidCredentials);
    }
    info!(user_id = user.id, "User logged in");

    Ok(AuthResponse {
        token: tokens.issue(user.id, now)?,
        user: user.public(),
    })
}
