use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::Item;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagError {
    #[error("itemId is required")]
    MissingItemId,
    #[error("a reason is required to flag an item")]
    EmptyReason,
}

/// A moderation marker. References an item by id only; nothing enforces
/// that the item still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    pub item_id: String,
    pub reason: String,
    pub date: DateTime<Utc>,
}

impl Flag {
    pub fn new(item_id: &str, reason: &str, at: DateTime<Utc>) -> Result<Self, FlagError> {
        if item_id.trim().is_empty() {
            return Err(FlagError::MissingItemId);
        }
        if reason.trim().is_empty() {
            return Err(FlagError::EmptyReason);
        }
        Ok(Self {
            item_id: item_id.to_string(),
            reason: reason.to_string(),
            date: at,
        })
    }
}

/// An item joined with one of its flags, as shown in the moderation queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedItem {
    #[serde(flatten)]
    pub item: Item,
    pub flag_reason: String,
    pub flag_date: DateTime<Utc>,
}
