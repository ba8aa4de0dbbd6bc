//! Item CRUD and reorder. Every query is scoped by the token's user.

use crate::error::{Error, Result};
use crate::model::{BucketItem, ItemPatch, NewItem, PriorityUpdate};
use crate::server::extract::{AuthUser, JsonBody};
use crate::server::state::AppState;
use crate::validate::{
    normalize_description, normalize_title, parse_category, parse_item_id, parse_status,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub priority: Option<i64>,
    pub goal_year: Option<i32>,
}

/// Absent and `null` fields are left alone. An empty description clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub priority: Option<i64>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub items: Option<Vec<PriorityUpdate>>,
}

impl CreateItemRequest {
    fn into_new_item(self) -> Result<NewItem> {
        let (Some(title), Some(category)) = (self.title, self.category) else {
            return Err(Error::InvalidArgument(
                "Title and category are required".to_string(),
            ));
        };
        if title.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "Title and category are required".to_string(),
            ));
        }

        let mut item = NewItem::new(normalize_title(&title)?, parse_category(&category)?);
        if let Some(description) = normalize_description(self.description) {
            item = item.with_description(description);
        }
        if let Some(status) = self.status {
            item = item.with_status(parse_status(&status)?);
        }
        if let Some(priority) = self.priority {
            item = item.with_priority(priority);
        }
        if let Some(year) = self.goal_year {
            item = item.with_goal_year(year);
        }
        Ok(item)
    }
}

impl UpdateItemRequest {
    fn into_patch(self) -> Result<ItemPatch> {
        let mut patch = ItemPatch::new();
        if let Some(title) = self.title {
            patch = patch.title(normalize_title(&title)?);
        }
        if let Some(description) = self.description {
            patch = patch.description(normalize_description(Some(description)));
        }
        if let Some(category) = self.category {
            patch = patch.category(parse_category(&category)?);
        }
        if let Some(status) = self.status {
            patch = patch.status(parse_status(&status)?);
        }
        if let Some(priority) = self.priority {
            patch = patch.priority(priority);
        }
        if let Some(completed) = self.completed {
            patch = patch.completed(completed);
        }
        Ok(patch)
    }
}

pub async fn list_items_handler(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<BucketItem>>> {
    let storage = state.pool.acquire().await?;
    let items = storage.list_items(auth.user_id)?;
    debug!(user_id = auth.user_id, count = items.len(), "Listed items");
    Ok(Json(items))
}

pub async fn list_by_category_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category): Path<String>,
) -> Result<Json<Vec<BucketItem>>> {
    let category = parse_category(&category)?;
    let storage = state.pool.acquire().await?;
    Ok(Json(storage.list_items_by_category(auth.user_id, category)?))
}

pub async fn get_item_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<BucketItem>> {
    let id = parse_item_id(&id)?;
    let storage = state.pool.acquire().await?;
    storage
        .get_item(auth.user_id, id)?
        .map(Json)
        .ok_or(Error::ItemNotFound { id })
}

pub async fn create_item_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<CreateItemRequest>,
) -> Result<(StatusCode, Json<BucketItem>)> {
    let new_item = req.into_new_item()?;

    let mut storage = state.pool.acquire().await?;
    let item = storage.create_item(auth.user_id, &new_item, state.clock.now())?;
    info!(user_id = auth.user_id, item_id = item.id, category = %item.category, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateItemRequest>,
) -> Result<Json<BucketItem>> {
    let id = parse_item_id(&id)?;
    let patch = req.into_patch()?;

    let mut storage = state.pool.acquire().await?;
    let item = storage.update_item(auth.user_id, id, &patch, state.clock.now())?;
    debug!(user_id = auth.user_id, item_id = id, "Item updated");

    Ok(Json(item))
}

pub async fn delete_item_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_item_id(&id)?;
    let mut storage = state.pool.acquire().await?;
    storage.delete_item(auth.user_id, id, state.clock.now())?;
    info!(user_id = auth.user_id, item_id = id, "Item deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<ReorderRequest>,
) -> Result<Json<Value>> {
    let updates = req
        .items
        .ok_or_else(|| Error::InvalidArgument("Items array is required".to_string()))?;

    let mut storage = state.pool.acquire().await?;
    let count = storage.reorder_items(auth.user_id, &updates, state.clock.now())?;
    debug!(user_id = auth.user_id, count, "Items reordered");

    Ok(Json(json!({ "message": "Items reordered successfully" })))
}
