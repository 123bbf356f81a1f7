use std::time::Duration;

use tokio::time::timeout;

use crate::types::Paste;

pub mod memory;
pub mod sql;

use memory::MemoryStore;
use sql::SqlStore;

/// Upper bound on any single store call.
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub trait PasteStore {
    /// Insert a freshly created paste.
    async fn insert(&mut self, paste: &Paste) -> crate::ApiResult<()>;

    /// Get a paste snapshot by id.
    async fn get(&mut self, id: &str) -> crate::ApiResult<Paste>;

    /// Spend one view and return the new count. The increment only applies
    /// while the view budget is open; an absent paste and a spent budget both
    /// fail with `NotFound`.
    async fn increment_views(&mut self, id: &str) -> crate::ApiResult<i64>;

    /// Get all pastes.
    async fn all(&mut self) -> crate::ApiResult<Vec<Paste>>;

    /// Delete a paste by id.
    async fn delete(&mut self, id: &str) -> crate::ApiResult<()>;

    /// Probe the backing store.
    async fn ping(&mut self) -> crate::ApiResult<()>;
}

#[derive(Clone)]
pub enum AnyStore {
    Sql(SqlStore),
    Memory(MemoryStore),
}

impl PasteStore for AnyStore {
    async fn insert(&mut self, paste: &Paste) -> crate::ApiResult<()> {
        match self {
            AnyStore::Sql(sql) => timeout(STORE_TIMEOUT, sql.insert(paste)).await?,
            AnyStore::Memory(memory) => timeout(STORE_TIMEOUT, memory.insert(paste)).await?,
        }
    }

    async fn get(&mut self, id: &str) -> crate::ApiResult<Paste> {
        match self {
            AnyStore::Sql(sql) => timeout(STORE_TIMEOUT, sql.get(id)).await?,
            AnyStore::Memory(memory) => timeout(STORE_TIMEOUT, memory.get(id)).await?,
        }
    }

    async fn increment_views(&mut self, id: &str) -> crate::ApiResult<i64> {
        match self {
            AnyStore::Sql(sql) => timeout(STORE_TIMEOUT, sql.increment_views(id)).await?,
            AnyStore::Memory(memory) => timeout(STORE_TIMEOUT, memory.increment_views(id)).await?,
        }
    }

    async fn all(&mut self) -> crate::ApiResult<Vec<Paste>> {
        match self {
            AnyStore::Sql(sql) => timeout(STORE_TIMEOUT, sql.all()).await?,
            AnyStore::Memory(memory) => timeout(STORE_TIMEOUT, memory.all()).await?,
        }
    }

    async fn delete(&mut self, id: &str) -> crate::ApiResult<()> {
        match self {
            AnyStore::Sql(sql) => timeout(STORE_TIMEOUT, sql.delete(id)).await?,
            AnyStore::Memory(memory) => timeout(STORE_TIMEOUT, memory.delete(id)).await?,
        }
    }

    async fn ping(&mut self) -> crate::ApiResult<()> {
        match self {
            AnyStore::Sql(sql) => timeout(STORE_TIMEOUT, sql.ping()).await?,
            AnyStore::Memory(memory) => timeout(STORE_TIMEOUT, memory.ping()).await?,
        }
    }
}

impl From<SqlStore> for AnyStore {
    fn from(value: SqlStore) -> Self {
        AnyStore::Sql(value)
    }
}

impl From<MemoryStore> for AnyStore {
    fn from(value: MemoryStore) -> Self {
        AnyStore::Memory(value)
    }
}
