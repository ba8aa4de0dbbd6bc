//! Archive listing and the yearly transition.

use crate::error::Result;
use crate::model::BucketItem;
use crate::server::extract::AuthUser;
use crate::server::state::AppState;
use crate::validate::parse_year;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

pub async fn list_archived_handler(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<BucketItem>>> {
    let storage = state.pool.acquire().await?;
    Ok(Json(storage.list_archived(auth.user_id)?))
}

pub async fn list_archived_by_year_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(year): Path<String>,
) -> Result<Json<Vec<BucketItem>>> {
    let year = parse_year(&year)?;
    let storage = state.pool.acquire().await?;
    Ok(Json(storage.list_archived_by_year(auth.user_id, year)?))
}

/// Archive last year's completed goals, then carry the rest forward.
///
/// Safe to call repeatedly; a second call in the same year changes nothing.
pub async fn archive_previous_year_handler(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>> {
    let mut storage = state.pool.acquire().await?;
    let outcome = storage.run_archive_transition(auth.user_id, state.clock.now())?;

    Ok(Json(json!({
        "message": "Previous year items archived successfully",
        "archivedCount": outcome.archived,
        "refreshedCount": outcome.refreshed,
    })))
}
