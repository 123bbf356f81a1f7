use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreatePaste {
    pub content: String,
    pub ttl_seconds: Option<i64>,
    pub max_views: Option<i64>,
}

#[derive(Serialize)]
pub struct CreatedPaste {
    pub id: String,
    pub url: String,
}

/// Result of a consuming read. `remaining_views` reflects the view just
/// spent; absent budgets serialize as null.
#[derive(Serialize)]
pub struct PasteContent {
    pub content: String,
    pub remaining_views: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Result of a non-consuming probe.
#[derive(Serialize)]
pub struct PasteStatus {
    pub remaining_views: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_available: bool,
}
