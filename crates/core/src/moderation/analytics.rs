use serde::{Deserialize, Serialize};

use super::stats::{top_categories, CategoryCount};
use crate::item::{Item, ItemStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_items: usize,
    pub claimed_items: usize,
    /// Claimed share of all items as a rounded percentage; 0 when empty.
    pub success_rate: u32,
    pub top_categories: Vec<CategoryCount>,
}

pub fn analytics(items: &[Item]) -> Analytics {
    let claimed_items = items
        .iter()
        .filter(|i| i.status == ItemStatus::Claimed)
        .count();
    let success_rate = if items.is_empty() {
        0
    } else {
        ((claimed_items as f64 / items.len() as f64) * 100.0).round() as u32
    };

    Analytics {
        total_items: items.len(),
        claimed_items,
        success_rate,
        top_categories: top_categories(items, 5),
    }
}
