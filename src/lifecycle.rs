//! Availability rules for a paste snapshot.
//!
//! Every function here is pure: the reference time is always passed in, never
//! read from a wall clock. Expiry arithmetic is fixed-point milliseconds.

use chrono::{DateTime, Duration, Utc};

use crate::types::Paste;

/// The instant a paste stops being served, if it carries a time budget.
pub fn expires_at(created_at: DateTime<Utc>, ttl_seconds: Option<i64>) -> Option<DateTime<Utc>> {
    let ttl = ttl_seconds?;
    created_at.checked_add_signed(Duration::milliseconds(ttl.saturating_mul(1000)))
}

/// A paste is expired at the boundary instant itself, not one past it.
pub fn is_expired_by_time(
    created_at: DateTime<Utc>,
    ttl_seconds: Option<i64>,
    now: DateTime<Utc>,
) -> bool {
    match expires_at(created_at, ttl_seconds) {
        Some(expiry) => now.timestamp_millis() >= expiry.timestamp_millis(),
        None => false,
    }
}

pub fn is_exhausted_by_views(views_count: i64, max_views: Option<i64>) -> bool {
    match max_views {
        Some(max) => views_count >= max,
        None => false,
    }
}

pub fn is_available(paste: &Paste, now: DateTime<Utc>) -> bool {
    !is_expired_by_time(paste.created_at, paste.ttl_seconds, now)
        && !is_exhausted_by_views(paste.views_count, paste.max_views)
}

/// Views left in the budget, or `None` when the paste is unbounded.
pub fn remaining_views(views_count: i64, max_views: Option<i64>) -> Option<i64> {
    max_views.map(|max| (max - views_count).max(0))
}
