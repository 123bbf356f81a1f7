use chrono::{DateTime, Utc};

pub mod api;

/// A stored paste and its expiry budgets.
///
/// Only `views_count` ever changes after creation, and only by increments of
/// one per consuming read.
#[derive(Debug, Clone)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub ttl_seconds: Option<i64>,
    pub max_views: Option<i64>,
    pub views_count: i64,
}
