//! Record store abstraction.
//!
//! Handlers talk to a `dyn CatStore` so the service runs unchanged against
//! PostgreSQL ([`PgCatStore`]) or the process-local [`InMemoryCatStore`].
//! Every method is a single atomic read or write; nothing spans records.

use async_trait::async_trait;

use crate::models::cat::{Cat, CatFilter, CreateCat, UpdateCat};

mod in_memory;
mod postgres;

pub use in_memory::InMemoryCatStore;
pub use postgres::PgCatStore;

/// Errors raised by a [`CatStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable keyed storage for cat records.
#[async_trait]
pub trait CatStore: Send + Sync {
    /// All cats matching `filter`, most recently created first.
    async fn list(&self, filter: &CatFilter) -> Result<Vec<Cat>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Cat>, StoreError>;

    /// Store a new cat; the store assigns its id.
    async fn create(&self, input: &CreateCat) -> Result<Cat, StoreError>;

    /// Replace the present fields of `input`. `None` if `id` does not exist.
    async fn update(&self, id: &str, input: &UpdateCat) -> Result<Option<Cat>, StoreError>;

    /// Remove a cat, returning its last value. `None` if it did not exist.
    async fn delete(&self, id: &str) -> Result<Option<Cat>, StoreError>;

    /// Cheap liveness probe used by the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;
}
