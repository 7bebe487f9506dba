use chrono::{DateTime, Utc};

/// Document key utilities.
///
/// Keys share one table and are namespaced by prefix:
/// - Item: `item_{suffix}`
/// - Anything else is an opaque key that never shows up in listings.
pub const ITEM_PREFIX: &str = "item_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKey {
    Item(String),
    Other(String),
}

impl DocumentKey {
    /// Parse a storage key into its kind.
    pub fn parse(key: &str) -> Self {
        match key.strip_prefix(ITEM_PREFIX) {
            Some(suffix) => DocumentKey::Item(suffix.to_string()),
            None => DocumentKey::Other(key.to_string()),
        }
    }

    /// Mint a fresh item key from a creation instant (`item_<epoch millis>`).
    pub fn new_item(at: DateTime<Utc>) -> Self {
        DocumentKey::Item(at.timestamp_millis().to_string())
    }

    /// Get the full key with its prefix.
    pub fn full_key(&self) -> String {
        match self {
            DocumentKey::Item(suffix) => format!("{ITEM_PREFIX}{suffix}"),
            DocumentKey::Other(key) => key.clone(),
        }
    }

    pub fn is_item(&self) -> bool {
        matches!(self, DocumentKey::Item(_))
    }
}
