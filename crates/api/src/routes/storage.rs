//! Generic key/value endpoint over the JSON document table.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use lostfound_core::document::{validate_put_request, ValidationError};
use lostfound_core::events::StorageEvent;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/storage",
        get(read)
            .post(upsert)
            .put(upsert)
            .delete(remove)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageQuery {
    pub key: Option<String>,
    pub list: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutRequest {
    pub key: Option<String>,
    pub data: Option<Value>,
    /// Expected current revision; the write fails with 409 if it moved.
    pub if_revision: Option<String>,
    /// Create-only; the write fails with 409 if the key is taken.
    #[serde(default)]
    pub if_absent: bool,
}

/// `?list=true` lists items; `?key=K` fetches one document.
async fn read(
    State(state): State<AppState>,
    Query(query): Query<StorageQuery>,
) -> ApiResult<Response> {
    if query.list.as_deref() == Some("true") {
        let entries: Vec<Value> = state
            .store()
            .list_items()
            .await?
            .into_iter()
            .map(|doc| doc.into_list_entry())
            .collect();
        return Ok(Json(entries).into_response());
    }

    let key = match query.key.filter(|k| !k.is_empty()) {
        Some(key) => key,
        None => return Err(ValidationError::MissingSelector.into()),
    };

    let document = state
        .store()
        .get(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

    let mut response = Json(document.data).into_response();
    if !document.revision.is_empty() {
        if let Ok(etag) = HeaderValue::from_str(&format!("\"{}\"", document.revision)) {
            response.headers_mut().insert(header::ETAG, etag);
        }
    }
    Ok(response)
}

async fn upsert(
    State(state): State<AppState>,
    body: Result<Json<PutRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    validate_put_request(request.key.as_deref(), request.data.as_ref())?;

    let (Some(key), Some(data)) = (request.key, request.data) else {
        return Err(ValidationError::MissingData.into());
    };

    let revision = if request.if_absent {
        if request.if_revision.is_some() {
            return Err(ApiError::BadRequest(
                "ifAbsent and ifRevision are mutually exclusive".to_string(),
            ));
        }
        state.store().insert(&key, data).await?
    } else {
        state
            .store()
            .put(&key, data, request.if_revision.as_deref())
            .await?
    };
    tracing::debug!(%key, %revision, "document stored");
    state
        .event_bus()
        .publish(StorageEvent::upserted(&key, &revision));

    Ok(Json(json!({
        "success": true,
        "key": key,
        "revision": revision,
    })))
}

/// Idempotent: deleting a missing key still succeeds.
async fn remove(
    State(state): State<AppState>,
    Query(query): Query<StorageQuery>,
) -> ApiResult<Json<Value>> {
    let key = query
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Key is required".to_string()))?;

    if state.store().delete(&key).await? {
        tracing::info!(%key, "document deleted");
        state.event_bus().publish(StorageEvent::deleted(&key));
    }

    Ok(Json(json!({ "success": true })))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
