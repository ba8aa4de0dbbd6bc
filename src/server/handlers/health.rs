use crate::error::Error;
use crate::server::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::SecondsFormat;
use serde_json::json;

pub const SERVICE_NAME: &str = "bucket-list-backend";

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "status": "ok",
        "timestamp": state.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "service": SERVICE_NAME,
    });
    (StatusCode::OK, axum::Json(body))
}

pub async fn not_found_handler() -> Response {
    Error::RouteNotFound.into_response()
}
