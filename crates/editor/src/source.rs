use async_trait::async_trait;
use catmander_db::models::cat::{Cat, UpdateCat};

use crate::error::EditorError;

/// Where an editing session reads and writes its record.
///
/// [`CatClient`](crate::client::CatClient) is the HTTP implementation.
#[async_trait]
pub trait CatSource: Send + Sync {
    /// Fetch the current record. A missing id is [`EditorError::NotFound`].
    async fn fetch(&self, id: &str) -> Result<Cat, EditorError>;

    /// Apply `changes` and return the full updated record.
    async fn update(&self, id: &str, changes: &UpdateCat) -> Result<Cat, EditorError>;
}
