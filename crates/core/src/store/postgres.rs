use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::Value;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::Row;
use tokio::sync::OnceCell;

use super::{new_revision, DocumentStore, StoreError, StoreResult};
use crate::document::StoredDocument;
use crate::flag::Flag;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// PostgreSQL backend: one JSONB row per document plus the flag table.
///
/// The schema is created lazily before the first statement; the migrations
/// only use `IF NOT EXISTS` so re-running them is harmless.
pub struct PgDocumentStore {
    pool: PgPool,
    schema: OnceCell<()>,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: OnceCell::new(),
        }
    }

    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply migrations once per process.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        self.schema
            .get_or_try_init(|| async {
                MIGRATOR.run(&self.pool).await?;
                tracing::info!("storage schema ready");
                Ok::<(), StoreError>(())
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn put(&self, key: &str, data: Value, if_revision: Option<&str>) -> StoreResult<String> {
        self.ensure_schema().await?;
        let revision = new_revision();

        match if_revision {
            None => {
                sqlx::query(
                    "INSERT INTO items (id, data, revision, updated_at) \
                     VALUES ($1, $2, $3, CURRENT_TIMESTAMP) \
                     ON CONFLICT (id) DO UPDATE \
                     SET data = EXCLUDED.data, revision = EXCLUDED.revision, updated_at = CURRENT_TIMESTAMP",
                )
                .bind(key)
                .bind(Json(&data))
                .bind(&revision)
                .execute(&self.pool)
                .await?;
            }
            Some(expected) => {
                let result = sqlx::query(
                    "UPDATE items SET data = $2, revision = $3, updated_at = CURRENT_TIMESTAMP \
                     WHERE id = $1 AND revision = $4",
                )
                .bind(key)
                .bind(Json(&data))
                .bind(&revision)
                .bind(expected)
                .execute(&self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(StoreError::RevisionMismatch {
                        key: key.to_string(),
                        expected: expected.to_string(),
                    });
                }
            }
        }

        Ok(revision)
    }

    async fn insert(&self, key: &str, data: Value) -> StoreResult<String> {
        self.ensure_schema().await?;
        let revision = new_revision();
        let result = sqlx::query(
            "INSERT INTO items (id, data, revision) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(key)
        .bind(Json(&data))
        .bind(&revision)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists {
                key: key.to_string(),
            });
        }
        Ok(revision)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<StoredDocument>> {
        self.ensure_schema().await?;
        let row = sqlx::query("SELECT id, data, revision FROM items WHERE id = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| document_from_row(&row)).transpose()
    }

    async fn list_items(&self) -> StoreResult<Vec<StoredDocument>> {
        self.ensure_schema().await?;
        let rows = sqlx::query(
            "SELECT id, data, revision FROM items \
             WHERE id LIKE 'item\\_%' \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(document_from_row).collect()
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        self.ensure_schema().await?;
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_flag(&self, flag: &Flag) -> StoreResult<()> {
        self.ensure_schema().await?;
        sqlx::query("INSERT INTO flagged_items (item_id, reason, date) VALUES ($1, $2, $3)")
            .bind(&flag.item_id)
            .bind(&flag.reason)
            .bind(flag.date.naive_utc())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_flags(&self) -> StoreResult<Vec<Flag>> {
        self.ensure_schema().await?;
        let rows = sqlx::query("SELECT item_id, reason, date FROM flagged_items ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> StoreResult<Flag> {
                let reason: Option<String> = row.try_get("reason")?;
                let date: Option<NaiveDateTime> = row.try_get("date")?;
                Ok(Flag {
                    item_id: row.try_get("item_id")?,
                    reason: reason.unwrap_or_default(),
                    date: date.unwrap_or_default().and_utc(),
                })
            })
            .collect()
    }

    async fn remove_flags(&self, item_id: &str) -> StoreResult<u64> {
        self.ensure_schema().await?;
        let result = sqlx::query("DELETE FROM flagged_items WHERE item_id = $1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn document_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<StoredDocument> {
    let Json(data): Json<Value> = row.try_get("data")?;
    let revision: Option<String> = row.try_get("revision")?;
    Ok(StoredDocument {
        key: row.try_get("id")?,
        data,
        revision: revision.unwrap_or_default(),
    })
}
