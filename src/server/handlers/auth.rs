//! Signup and login.

use crate::auth::{self, AuthResponse};
use crate::error::{Error, Result};
use crate::server::extract::JsonBody;
use crate::server::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn credentials(email: Option<String>, password: Option<String>) -> Result<(String, String)> {
    match (email, password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(Error::InvalidArgument("Email and password required".to_string())),
    }
}

/// Run password hashing work off the async worker threads.
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Other(format!("auth task failed: {e}")))?
}

pub async fn signup_handler(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let (email, password) = credentials(req.email, req.password)?;

    let mut storage = state.pool.acquire().await?;
    let tokens = Arc::clone(&state.tokens);
    let now = state.clock.now();
    let response = run_blocking(move || {
        auth::signup(&mut storage, &tokens, &email, &password, req.full_name, now)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login_handler(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let (email, password) = credentials(req.email, req.password)?;

    let storage = state.pool.acquire().await?;
    let tokens = Arc::clone(&state.tokens);
    let now = state.clock.now();
    let response =
        run_blocking(move || auth::login(&storage, &tokens, &email, &password, now)).await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_fields() {
        assert!(credentials(Some("a@b.co".into()), Some("secret1".into())).is_ok());
        assert!(credentials(Some("  ".into()), Some("secret1".into())).is_err());
        assert!(credentials(Some("a@b.co".into()), None).is_err());
    }

    #[tokio::test]
    async fn test_run_blocking_leaves_runtime_thread() {
        let caller = std::thread::current().id();
        let worker = run_blocking(|| Ok(std::thread::current().id())).await.unwrap();
        assert_ne!(caller, worker);
    }

    #[tokio::test]
    async fn test_run_blocking_propagates_errors() {
        let err = run_blocking(|| -> Result<()> { Err(Error::InvalidCredentials) })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }
}
