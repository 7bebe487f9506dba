use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemStatus, ItemType};

const TOP_CATEGORY_LIMIT: usize = 5;
const RECENT_ACTIVITY_LIMIT: usize = 5;
const ACTIVITY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Lost/found postings on one calendar day of the viewer's timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    /// Chart label, e.g. `Mar 5`.
    pub label: String,
    pub lost: usize,
    pub found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub time_ago: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_items: usize,
    pub claimed_items: usize,
    pub unclaimed_items: usize,
    /// Distinct contact emails.
    pub active_users: usize,
    pub top_categories: Vec<CategoryCount>,
    /// Oldest day first, ending today.
    pub weekly_activity: Vec<DailyActivity>,
    pub recent_activity: Vec<RecentActivity>,
}

/// Compute the dashboard from the full collection. `now` carries the
/// viewer's timezone, which decides the day buckets.
pub fn dashboard_stats<Tz: TimeZone>(items: &[Item], now: DateTime<Tz>) -> DashboardStats {
    let claimed_items = count_status(items, ItemStatus::Claimed);
    let unclaimed_items = count_status(items, ItemStatus::Unclaimed);
    let active_users = items
        .iter()
        .map(|i| i.contact_email.as_str())
        .collect::<HashSet<_>>()
        .len();

    let now_utc = now.with_timezone(&Utc);
    let mut newest: Vec<&Item> = items.iter().collect();
    newest.sort_by(|a, b| b.date.cmp(&a.date));
    let recent_activity = newest
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|item| RecentActivity {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            kind: item.kind,
            time_ago: relative_time(item.date, now_utc),
        })
        .collect();

    DashboardStats {
        total_items: items.len(),
        claimed_items,
        unclaimed_items,
        active_users,
        top_categories: top_categories(items, TOP_CATEGORY_LIMIT),
        weekly_activity: weekly_activity(items, &now),
        recent_activity,
    }
}

fn count_status(items: &[Item], status: ItemStatus) -> usize {
    items.iter().filter(|i| i.status == status).count()
}

/// Per-category counts, largest first. Ties keep first-seen order.
pub fn top_categories(items: &[Item], limit: usize) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        match index.get(item.category.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(item.category.as_str(), counts.len());
                counts.push(CategoryCount {
                    category: item.category.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

fn weekly_activity<Tz: TimeZone>(items: &[Item], now: &DateTime<Tz>) -> Vec<DailyActivity> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut per_day: HashMap<NaiveDate, (usize, usize)> = HashMap::new();
    for item in items {
        let day = item.date.with_timezone(&tz).date_naive();
        let entry = per_day.entry(day).or_default();
        match item.kind {
            ItemType::Lost => entry.0 += 1,
            ItemType::Found => entry.1 += 1,
        }
    }

    (0..ACTIVITY_WINDOW_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let (lost, found) = per_day.get(&date).copied().unwrap_or_default();
            DailyActivity {
                date,
                label: date.format("%b %-d").to_string(),
                lost,
                found,
            }
        })
        .collect()
}

/// Coarse "time ago" text for activity feeds.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "Just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}
