//! Admin-side pipelines. Everything here is recomputed from the full item
//! collection on each call.

pub mod analytics;
pub mod export;
pub mod flags;
pub mod stats;
pub mod users;

pub use analytics::{analytics, Analytics};
pub use export::{export_filename, items_to_csv, CSV_HEADER};
pub use flags::flagged_view;
pub use stats::{
    dashboard_stats, relative_time, top_categories, CategoryCount, DailyActivity, DashboardStats,
    RecentActivity,
};
pub use users::{user_summaries, UserSummary};
