use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events emitted after successful writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StorageEvent {
    Upserted(DocumentEvent),
    Deleted(DocumentEvent),
    Flagged(FlagEvent),
    Approved(FlagEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEvent {
    pub key: String,
    pub revision: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagEvent {
    pub item_id: String,
    /// Flags added or removed by this event.
    pub count: u64,
    pub timestamp: DateTime<Utc>,
}

impl StorageEvent {
    pub fn upserted(key: &str, revision: &str) -> Self {
        StorageEvent::Upserted(DocumentEvent {
            key: key.to_string(),
            revision: Some(revision.to_string()),
            timestamp: Utc::now(),
        })
    }

    pub fn deleted(key: &str) -> Self {
        StorageEvent::Deleted(DocumentEvent {
            key: key.to_string(),
            revision: None,
            timestamp: Utc::now(),
        })
    }

    pub fn flagged(item_id: &str) -> Self {
        StorageEvent::Flagged(FlagEvent {
            item_id: item_id.to_string(),
            count: 1,
            timestamp: Utc::now(),
        })
    }

    pub fn approved(item_id: &str, removed: u64) -> Self {
        StorageEvent::Approved(FlagEvent {
            item_id: item_id.to_string(),
            count: removed,
            timestamp: Utc::now(),
        })
    }
}
