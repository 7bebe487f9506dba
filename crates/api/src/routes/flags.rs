//! Moderation flag collection. Admin only.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use lostfound_core::events::StorageEvent;
use lostfound_core::moderation::flagged_view;
use lostfound_core::{Flag, FlaggedItem};
use serde::Deserialize;
use serde_json::{json, Value};

use super::load_items;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/flags",
        get(list_flagged).post(flag_item).delete(approve_item),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagRequest {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveQuery {
    pub item_id: Option<String>,
}

/// Record a flag. The item itself is untouched and is not checked for
/// existence.
async fn flag_item(
    State(state): State<AppState>,
    admin: AdminUser,
    body: Result<Json<FlagRequest>, JsonRejection>,
) -> ApiResult<Json<Flag>> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let flag = Flag::new(&request.item_id, &request.reason, Utc::now())?;

    state.store().add_flag(&flag).await?;
    tracing::info!(item_id = %flag.item_id, by = %admin.email, "item flagged");
    state.event_bus().publish(StorageEvent::flagged(&flag.item_id));

    Ok(Json(flag))
}

/// Flagged items joined with their flags; flags on deleted items are skipped.
async fn list_flagged(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<FlaggedItem>>> {
    let flags = state.store().list_flags().await?;
    let items = load_items(&state).await?;
    Ok(Json(flagged_view(&flags, &items)))
}

/// Approve: drop every flag on the item. The item stays as it is.
async fn approve_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(query): Query<ApproveQuery>,
) -> ApiResult<Json<Value>> {
    let item_id = query
        .item_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("itemId is required".to_string()))?;

    let removed = state.store().remove_flags(&item_id).await?;
    tracing::info!(%item_id, removed, by = %admin.email, "flags cleared");
    state
        .event_bus()
        .publish(StorageEvent::approved(&item_id, removed));

    Ok(Json(json!({ "success": true, "removed": removed })))
}
