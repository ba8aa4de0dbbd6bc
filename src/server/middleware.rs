//! Cross-cutting request layers.

use crate::server::response::api_error;
use crate::server::state::AppState;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{info, warn};

const API_KEY_HEADER: &str = "x-api-key";

fn is_public_path(path: &str) -> bool {
    path == "/health" || path == "/api/auth" || path.starts_with("/api/auth/")
}

/// Reject requests without the configured `X-API-Key`.
///
/// Health and auth routes stay open. No-op when no key is configured.
pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(req).await;
    };

    let path = req.uri().path().to_string();
    if is_public_path(&path) {
        return next.run(req).await;
    }

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if provided == Some(expected) {
        next.run(req).await
    } else {
        warn!(path = %path, "Rejected request without a valid API key");
        api_error(StatusCode::UNAUTHORIZED, "Invalid or missing API key")
    }
}

/// One log line per request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms,
        "Request"
    );
    response
}
