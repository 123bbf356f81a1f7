use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::ApiError;
use crate::store::PasteStore;
use crate::types::api::{PasteContent, PasteStatus};
use crate::types::Paste;
use crate::{ids, lifecycle, App};

/// Validate and persist a new paste, returning the stored record.
pub async fn create(
    app: &mut App,
    content: &str,
    ttl_seconds: Option<i64>,
    max_views: Option<i64>,
    now: DateTime<Utc>,
) -> crate::ApiResult<Paste> {
    if content.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "content",
            reason: "must not be empty",
        });
    }
    if matches!(ttl_seconds, Some(ttl) if ttl < 1) {
        return Err(ApiError::Validation {
            field: "ttl_seconds",
            reason: "must be at least 1",
        });
    }
    if matches!(max_views, Some(views) if views < 1) {
        return Err(ApiError::Validation {
            field: "max_views",
            reason: "must be at least 1",
        });
    }

    let paste = Paste {
        id: ids::generate(),
        content: content.to_owned(),
        created_at: now,
        ttl_seconds,
        max_views,
        views_count: 0,
    };

    info!(
        "new paste: id='{id}', size={size}",
        id = paste.id,
        size = paste.content.len()
    );

    app.store.insert(&paste).await?;

    Ok(paste)
}

/// Read a paste and spend one view.
///
/// The returned `remaining_views` reflects the view just consumed, not the
/// pre-read count.
pub async fn consume_view(
    app: &mut App,
    id: &str,
    now: DateTime<Utc>,
) -> crate::ApiResult<PasteContent> {
    let paste = app.store.get(id).await?;

    if !lifecycle::is_available(&paste, now) {
        // closed pastes are indistinguishable from absent ones
        return Err(ApiError::NotFound);
    }

    let views_count = app.store.increment_views(id).await?;

    Ok(PasteContent {
        content: paste.content,
        remaining_views: lifecycle::remaining_views(views_count, paste.max_views),
        expires_at: lifecycle::expires_at(paste.created_at, paste.ttl_seconds),
    })
}

/// Report a paste's budgets without spending a view.
pub async fn inspect(app: &mut App, id: &str, now: DateTime<Utc>) -> crate::ApiResult<PasteStatus> {
    let paste = app.store.get(id).await?;

    Ok(PasteStatus {
        remaining_views: lifecycle::remaining_views(paste.views_count, paste.max_views),
        expires_at: lifecycle::expires_at(paste.created_at, paste.ttl_seconds),
        is_available: lifecycle::is_available(&paste, now),
    })
}
