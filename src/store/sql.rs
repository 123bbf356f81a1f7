use chrono::{TimeZone, Utc};
use sqlx::{AnyPool, FromRow};

use super::PasteStore;
use crate::types::Paste;

/// A paste as stored. `created_at` is kept as epoch milliseconds so the
/// expiry arithmetic stays exact across database backends.
#[derive(FromRow)]
struct PasteRow {
    id: String,
    content: String,
    created_at: i64,
    ttl_seconds: Option<i64>,
    max_views: Option<i64>,
    views_count: i64,
}

impl TryFrom<PasteRow> for Paste {
    type Error = sqlx::Error;

    fn try_from(row: PasteRow) -> Result<Self, Self::Error> {
        let created_at = Utc
            .timestamp_millis_opt(row.created_at)
            .single()
            .ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "created_at".into(),
                source: "timestamp out of range".into(),
            })?;

        Ok(Paste {
            id: row.id,
            content: row.content,
            created_at,
            ttl_seconds: row.ttl_seconds,
            max_views: row.max_views,
            views_count: row.views_count,
        })
    }
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS paste (
    id TEXT PRIMARY KEY,
    content TEXT NOT NULL,
    created_at BIGINT NOT NULL,
    ttl_seconds BIGINT,
    max_views BIGINT,
    views_count BIGINT NOT NULL DEFAULT 0
)";

#[derive(Clone)]
pub struct SqlStore {
    pool: AnyPool,
}

impl SqlStore {
    /// Connect to a database by URL and make sure the schema exists.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let pool = AnyPool::connect(url).await?;
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(SqlStore { pool })
    }
}

impl PasteStore for SqlStore {
    async fn insert(&mut self, paste: &Paste) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(
            "INSERT INTO paste (id, content, created_at, ttl_seconds, max_views, views_count) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&paste.id)
        .bind(&paste.content)
        .bind(paste.created_at.timestamp_millis())
        .bind(paste.ttl_seconds)
        .bind(paste.max_views)
        .bind(paste.views_count)
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    async fn get(&mut self, id: &str) -> crate::ApiResult<Paste> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, PasteRow>(
            "SELECT id, content, created_at, ttl_seconds, max_views, views_count FROM paste \
             WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut conn)
        .await?;
        Ok(row.try_into()?)
    }

    async fn increment_views(&mut self, id: &str) -> crate::ApiResult<i64> {
        let mut conn = self.pool.acquire().await?;
        // one conditional statement, so concurrent reads can never push the
        // count past the budget; zero rows matched reads as RowNotFound
        let views_count = sqlx::query_scalar(
            "UPDATE paste SET views_count = views_count + 1 \
             WHERE id = ? AND (max_views IS NULL OR views_count < max_views) \
             RETURNING views_count",
        )
        .bind(id)
        .fetch_one(&mut conn)
        .await?;
        Ok(views_count)
    }

    async fn all(&mut self) -> crate::ApiResult<Vec<Paste>> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, PasteRow>(
            "SELECT id, content, created_at, ttl_seconds, max_views, views_count FROM paste",
        )
        .fetch_all(&mut conn)
        .await?;
        rows.into_iter().map(|row| Ok(row.try_into()?)).collect()
    }

    async fn delete(&mut self, id: &str) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("DELETE FROM paste WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn ping(&mut self) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT id FROM paste LIMIT 1")
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
