use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::PasteStore;
use crate::error::ApiError;
use crate::types::Paste;

/// In-memory paste store. Pastes live for the lifetime of the process; meant
/// for development and tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pastes: Arc<Mutex<HashMap<String, Paste>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Paste>> {
        self.pastes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PasteStore for MemoryStore {
    async fn insert(&mut self, paste: &Paste) -> crate::ApiResult<()> {
        let mut pastes = self.lock();
        if pastes.contains_key(&paste.id) {
            return Err(ApiError::Conflict);
        }
        pastes.insert(paste.id.clone(), paste.clone());
        Ok(())
    }

    async fn get(&mut self, id: &str) -> crate::ApiResult<Paste> {
        self.lock().get(id).cloned().ok_or(ApiError::NotFound)
    }

    async fn increment_views(&mut self, id: &str) -> crate::ApiResult<i64> {
        let mut pastes = self.lock();
        let paste = pastes.get_mut(id).ok_or(ApiError::NotFound)?;

        // check and increment under one lock, so the count can never pass
        // the budget
        if let Some(max) = paste.max_views {
            if paste.views_count >= max {
                return Err(ApiError::NotFound);
            }
        }

        paste.views_count += 1;
        Ok(paste.views_count)
    }

    async fn all(&mut self) -> crate::ApiResult<Vec<Paste>> {
        Ok(self.lock().values().cloned().collect())
    }

    async fn delete(&mut self, id: &str) -> crate::ApiResult<()> {
        self.lock().remove(id);
        Ok(())
    }

    async fn ping(&mut self) -> crate::ApiResult<()> {
        Ok(())
    }
}
