use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemStatus};

/// Posting activity of one contact email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub email: String,
    pub total_posts: usize,
    pub claimed: usize,
    pub last_active: DateTime<Utc>,
}

/// Group items by owner, most recently active first.
pub fn user_summaries(items: &[Item]) -> Vec<UserSummary> {
    let mut by_email: HashMap<&str, UserSummary> = HashMap::new();

    for item in items {
        let summary = by_email
            .entry(item.contact_email.as_str())
            .or_insert_with(|| UserSummary {
                email: item.contact_email.clone(),
                total_posts: 0,
                claimed: 0,
                last_active: item.date,
            });
        summary.total_posts += 1;
        if item.status == ItemStatus::Claimed {
            summary.claimed += 1;
        }
        summary.last_active = summary.last_active.max(item.date);
    }

    let mut summaries: Vec<UserSummary> = by_email.into_values().collect();
    summaries.sort_by(|a, b| {
        b.last_active
            .cmp(&a.last_active)
            .then_with(|| a.email.cmp(&b.email))
    });
    summaries
}
