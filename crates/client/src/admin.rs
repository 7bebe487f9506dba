use chrono::Utc;
use lostfound_core::moderation::{Analytics, DashboardStats, UserSummary};
use lostfound_core::{Flag, FlaggedItem};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::HttpApi;
use crate::repository::ItemRepository;

/// Moderation and dashboard operations. Needs an admin token from the
/// identity provider.
#[derive(Debug, Clone)]
pub struct AdminClient {
    api: HttpApi,
    repo: ItemRepository,
}

#[derive(Debug, Deserialize)]
struct ApproveResponse {
    removed: u64,
}

impl AdminClient {
    pub fn new(config: &ClientConfig, token: impl Into<String>) -> ClientResult<Self> {
        Ok(Self {
            api: HttpApi::new(config)?.with_token(token),
            repo: ItemRepository::new(config)?,
        })
    }

    /// Flag an item for review. Blank ids and reasons are rejected before
    /// anything is sent.
    pub async fn flag_item(&self, item_id: &str, reason: &str) -> ClientResult<Flag> {
        Flag::new(item_id, reason, Utc::now())?;
        let builder = self
            .api
            .request(Method::POST, "/api/flags")
            .json(&json!({ "itemId": item_id, "reason": reason }));
        Ok(self.api.send(builder, item_id).await?.json().await?)
    }

    /// Clear every flag on the item. Returns how many were removed.
    pub async fn approve_item(&self, item_id: &str) -> ClientResult<u64> {
        let builder = self
            .api
            .request(Method::DELETE, "/api/flags")
            .query(&[("itemId", item_id)]);
        let response: ApproveResponse = self.api.send(builder, item_id).await?.json().await?;
        Ok(response.removed)
    }

    /// Permanent delete. Flags on the item are left behind.
    pub async fn delete_item(&self, item_id: &str) -> ClientResult<()> {
        self.repo.delete(item_id).await?;
        tracing::info!(%item_id, "item deleted");
        Ok(())
    }

    pub async fn flagged_items(&self) -> Vec<FlaggedItem> {
        self.get_or_default("/api/flags", &[]).await.unwrap_or_default()
    }

    /// Dashboard for a viewer `tz_offset_minutes` east of UTC.
    pub async fn dashboard(&self, tz_offset_minutes: i32) -> Option<DashboardStats> {
        let offset = tz_offset_minutes.to_string();
        self.get_or_default("/api/admin/stats", &[("tzOffsetMinutes", offset.as_str())])
            .await
    }

    pub async fn users(&self) -> Vec<UserSummary> {
        self.get_or_default("/api/admin/users", &[]).await.unwrap_or_default()
    }

    pub async fn analytics(&self) -> Option<Analytics> {
        self.get_or_default("/api/admin/analytics", &[]).await
    }

    /// The CSV export as text.
    pub async fn export_csv(&self) -> ClientResult<String> {
        let builder = self.api.request(Method::GET, "/api/admin/export");
        Ok(self.api.send(builder, "export").await?.text().await?)
    }

    async fn get_or_default<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Option<T> {
        match self.try_get(path, query).await {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%path, "admin request failed: {err}");
                None
            }
        }
    }

    async fn try_get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let builder = self.api.request(Method::GET, path).query(query);
        Ok(self.api.send(builder, path).await?.json().await?)
    }
}
