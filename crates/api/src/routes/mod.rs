pub mod admin;
pub mod flags;
pub mod health;
pub mod storage;

use axum::Router;
use lostfound_core::item::{items_from_documents, Item};

use crate::error::ApiResult;
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(storage::routes())
        .merge(flags::routes())
        .merge(admin::routes())
        .with_state(state)
}

/// Full item collection, newest-created first. Every dashboard view scans it.
pub(crate) async fn load_items(state: &AppState) -> ApiResult<Vec<Item>> {
    let documents = state.store().list_items().await?;
    Ok(items_from_documents(
        documents
            .into_iter()
            .map(|doc| doc.into_list_entry())
            .collect(),
    ))
}
