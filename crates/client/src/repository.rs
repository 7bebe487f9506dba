use lostfound_core::item::{items_from_documents, Item};
use reqwest::{header, Method};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::HttpApi;

const STORAGE_PATH: &str = "/api/storage";

/// A document together with the revision it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub document: T,
    pub revision: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertReceipt {
    pub key: String,
    #[serde(default)]
    pub revision: Option<String>,
}

/// Uniform access to the storage endpoint. No caching: every call goes to
/// the server.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    api: HttpApi,
}

impl ItemRepository {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            api: HttpApi::new(config)?,
        })
    }

    /// Every item listing entry, or an empty list on any failure.
    pub async fn fetch_all(&self) -> Vec<Value> {
        match self.try_fetch_all().await {
            Ok(documents) => documents,
            Err(err) => {
                tracing::warn!("fetching item list failed: {err}");
                Vec::new()
            }
        }
    }

    /// [`fetch_all`](Self::fetch_all) decoded as items.
    pub async fn fetch_items(&self) -> Vec<Item> {
        items_from_documents(self.fetch_all().await)
    }

    /// One document, or `None` if it is missing or the request failed.
    pub async fn fetch_one(&self, key: &str) -> Option<Value> {
        self.fetch_versioned(key).await.map(|v| v.document)
    }

    pub async fn fetch_versioned(&self, key: &str) -> Option<Versioned<Value>> {
        match self.try_fetch_one(key).await {
            Ok(found) => Some(found),
            Err(err) => {
                tracing::warn!(%key, "fetching document failed: {err}");
                None
            }
        }
    }

    /// Unconditional write. `None` on failure.
    pub async fn upsert(&self, key: &str, document: &Value) -> Option<UpsertReceipt> {
        match self.try_upsert(key, document, None).await {
            Ok(receipt) => Some(receipt),
            Err(err) => {
                tracing::warn!(%key, "saving document failed: {err}");
                None
            }
        }
    }

    /// Write only if the stored revision is still `revision`. Callers need
    /// to tell a conflict apart from other failures, so this one returns
    /// the error.
    pub async fn upsert_if(
        &self,
        key: &str,
        document: &Value,
        revision: Option<&str>,
    ) -> ClientResult<UpsertReceipt> {
        self.try_upsert(key, document, revision).await
    }

    /// Create-only write. Fails with `Conflict` if `key` already exists.
    pub async fn create(&self, key: &str, document: &Value) -> ClientResult<UpsertReceipt> {
        self.try_write(key, json!({ "key": key, "data": document, "ifAbsent": true }))
            .await
    }

    pub async fn delete(&self, key: &str) -> ClientResult<()> {
        let builder = self
            .api
            .request(Method::DELETE, STORAGE_PATH)
            .query(&[("key", key)]);
        self.api.send(builder, key).await?;
        Ok(())
    }

    async fn try_fetch_all(&self) -> ClientResult<Vec<Value>> {
        let builder = self
            .api
            .request(Method::GET, STORAGE_PATH)
            .query(&[("list", "true")]);
        Ok(self.api.send(builder, "item list").await?.json().await?)
    }

    async fn try_fetch_one(&self, key: &str) -> ClientResult<Versioned<Value>> {
        let builder = self
            .api
            .request(Method::GET, STORAGE_PATH)
            .query(&[("key", key)]);
        let response = self.api.send(builder, key).await?;
        let revision = response
            .headers()
            .get(header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(|etag| etag.trim_matches('"').to_string());
        Ok(Versioned {
            document: response.json().await?,
            revision,
        })
    }

    async fn try_upsert(
        &self,
        key: &str,
        document: &Value,
        revision: Option<&str>,
    ) -> ClientResult<UpsertReceipt> {
        let mut body = json!({ "key": key, "data": document });
        if let Some(revision) = revision {
            body["ifRevision"] = json!(revision);
        }
        self.try_write(key, body).await
    }

    async fn try_write(&self, key: &str, body: Value) -> ClientResult<UpsertReceipt> {
        let builder = self.api.request(Method::POST, STORAGE_PATH).json(&body);
        Ok(self.api.send(builder, key).await?.json().await?)
    }
}
