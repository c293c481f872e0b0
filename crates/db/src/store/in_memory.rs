//! HashMap-backed cat store for tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CatStore, StoreError};
use crate::models::cat::{Cat, CatFilter, CreateCat, UpdateCat};

/// In-memory [`CatStore`]. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryCatStore {
    cats: Arc<RwLock<HashMap<String, Cat>>>,
}

impl InMemoryCatStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cat under a caller-chosen id, replacing any existing entry.
    pub async fn insert_with_id(&self, id: impl Into<String>, input: &CreateCat) -> Cat {
        let now = chrono::Utc::now();
        let cat = Cat {
            id: id.into(),
            name: input.name.clone(),
            color: input.color.clone(),
            is_adopted: input.is_adopted,
            created_at: now,
            updated_at: now,
        };
        self.cats.write().await.insert(cat.id.clone(), cat.clone());
        cat
    }

    pub async fn len(&self) -> usize {
        self.cats.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cats.read().await.is_empty()
    }
}

#[async_trait]
impl CatStore for InMemoryCatStore {
    async fn list(&self, filter: &CatFilter) -> Result<Vec<Cat>, StoreError> {
        let mut cats: Vec<Cat> = self
            .cats
            .read()
            .await
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        cats.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(cats)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Cat>, StoreError> {
        Ok(self.cats.read().await.get(id).cloned())
    }

    async fn create(&self, input: &CreateCat) -> Result<Cat, StoreError> {
        let id = uuid::Uuid::now_v7().to_string();
        Ok(self.insert_with_id(id, input).await)
    }

    async fn update(&self, id: &str, input: &UpdateCat) -> Result<Option<Cat>, StoreError> {
        let mut cats = self.cats.write().await;
        let Some(cat) = cats.get_mut(id) else {
            return Ok(None);
        };
        input.apply_to(cat);
        cat.updated_at = chrono::Utc::now();
        Ok(Some(cat.clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<Cat>, StoreError> {
        Ok(self.cats.write().await.remove(id))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
