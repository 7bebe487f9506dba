use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemStatus, ItemType};

/// Browse filters. `None` (or a blank string) means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilter {
    /// Case-insensitive substring match against name or description.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<ItemType>,
    #[serde(default)]
    pub status: Option<ItemStatus>,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        self.matches_search(item)
            && non_blank(&self.category).map_or(true, |c| item.category == c)
            && self.kind.map_or(true, |k| item.kind == k)
            && self.status.map_or(true, |s| item.status == s)
    }

    fn matches_search(&self, item: &Item) -> bool {
        match non_blank(&self.search) {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                item.name.to_lowercase().contains(&term)
                    || item.description.to_lowercase().contains(&term)
            }
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
