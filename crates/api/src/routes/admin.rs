//! Admin dashboard endpoints, recomputed from the full collection per call.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{FixedOffset, Utc};
use lostfound_core::moderation::{
    analytics, dashboard_stats, export_filename, items_to_csv, user_summaries, Analytics,
    DashboardStats, UserSummary,
};
use serde::Deserialize;

use super::load_items;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/stats", get(stats))
        .route("/api/admin/users", get(users))
        .route("/api/admin/analytics", get(analytics_report))
        .route("/api/admin/export", get(export_csv))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    /// Viewer's offset from UTC in minutes, east positive.
    #[serde(default)]
    pub tz_offset_minutes: i32,
}

async fn stats(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<DashboardStats>> {
    let offset = query
        .tz_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| ApiError::BadRequest("tzOffsetMinutes is out of range".to_string()))?;

    let items = load_items(&state).await?;
    Ok(Json(dashboard_stats(&items, Utc::now().with_timezone(&offset))))
}

async fn users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<UserSummary>>> {
    let items = load_items(&state).await?;
    Ok(Json(user_summaries(&items)))
}

async fn analytics_report(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Analytics>> {
    let items = load_items(&state).await?;
    Ok(Json(analytics(&items)))
}

async fn export_csv(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Response> {
    let items = load_items(&state).await?;
    let csv = items_to_csv(&items)
        .map_err(|err| ApiError::Internal(format!("csv export failed: {err}")))?;
    let filename = export_filename(Utc::now().date_naive());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
