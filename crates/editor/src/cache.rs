//! Caller-owned list of cats kept in step with editor results.
//!
//! After a successful submit the editor already holds the updated record,
//! so [`CatListCache::upsert`] patches the list in place instead of
//! re-fetching it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use catmander_db::models::cat::Cat;

use crate::client::CatClient;
use crate::error::EditorError;

/// Shared, cloneable list of cats in display order.
#[derive(Clone, Default)]
pub struct CatListCache {
    cats: Arc<Mutex<Vec<Cat>>>,
}

impl CatListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fresh `GET /cats` result.
    pub async fn refresh(
        &self,
        client: &CatClient,
        is_adopted: Option<bool>,
    ) -> Result<usize, EditorError> {
        let cats = client.list(is_adopted).await?;
        let count = cats.len();
        *self.lock() = cats;
        tracing::debug!(count, "Cat list refreshed");
        Ok(count)
    }

    /// Replace the entry with the same id, or prepend `cat` if it is new.
    pub fn upsert(&self, cat: Cat) {
        let mut cats = self.lock();
        match cats.iter_mut().find(|c| c.id == cat.id) {
            Some(existing) => *existing = cat,
            None => cats.insert(0, cat),
        }
    }

    /// Drop the entry for `id`, returning it if present.
    pub fn remove(&self, id: &str) -> Option<Cat> {
        let mut cats = self.lock();
        let index = cats.iter().position(|c| c.id == id)?;
        Some(cats.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<Cat> {
        self.lock().iter().find(|c| c.id == id).cloned()
    }

    pub fn snapshot(&self) -> Vec<Cat> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Cat>> {
        self.cats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
