use async_trait::async_trait;

use super::{CatStore, StoreError};
use crate::models::cat::{Cat, CatFilter, CreateCat, UpdateCat};
use crate::repositories::CatRepo;
use crate::DbPool;

/// [`CatStore`] backed by the `cats` table.
#[derive(Clone)]
pub struct PgCatStore {
    pool: DbPool,
}

impl PgCatStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatStore for PgCatStore {
    async fn list(&self, filter: &CatFilter) -> Result<Vec<Cat>, StoreError> {
        Ok(CatRepo::list(&self.pool, filter).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Cat>, StoreError> {
        Ok(CatRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create(&self, input: &CreateCat) -> Result<Cat, StoreError> {
        Ok(CatRepo::create(&self.pool, input).await?)
    }

    async fn update(&self, id: &str, input: &UpdateCat) -> Result<Option<Cat>, StoreError> {
        Ok(CatRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: &str) -> Result<Option<Cat>, StoreError> {
        Ok(CatRepo::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
