//! Repository for the `cats` table.

use sqlx::PgPool;

use crate::models::cat::{Cat, CatFilter, CreateCat, UpdateCat};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color, is_adopted, created_at, updated_at";

/// Provides CRUD operations for cats.
pub struct CatRepo;

impl CatRepo {
    /// Insert a new cat under a freshly generated UUIDv7 id, returning the
    /// created row.
    pub async fn create(pool: &PgPool, input: &CreateCat) -> Result<Cat, sqlx::Error> {
        let id = uuid::Uuid::now_v7().to_string();
        Self::create_with_id(pool, &id, input).await
    }

    /// Insert a new cat under a caller-chosen id.
    pub async fn create_with_id(
        pool: &PgPool,
        id: &str,
        input: &CreateCat,
    ) -> Result<Cat, sqlx::Error> {
        let query = format!(
            "INSERT INTO cats (id, name, color, is_adopted)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cat>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(input.is_adopted)
            .fetch_one(pool)
            .await
    }

    /// Find a cat by its id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Cat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cats WHERE id = $1");
        sqlx::query_as::<_, Cat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List cats, most recently created first. A `None` adoption flag in
    /// `filter` matches every row.
    pub async fn list(pool: &PgPool, filter: &CatFilter) -> Result<Vec<Cat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cats
             WHERE ($1::BOOLEAN IS NULL OR is_adopted = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Cat>(&query)
            .bind(filter.is_adopted)
            .fetch_all(pool)
            .await
    }

    /// Update a cat. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateCat,
    ) -> Result<Option<Cat>, sqlx::Error> {
        let query = format!(
            "UPDATE cats SET
                name = COALESCE($2, name),
                color = COALESCE($3, color),
                is_adopted = COALESCE($4, is_adopted),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cat>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(input.is_adopted)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a cat, returning the removed row if there was one.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<Option<Cat>, sqlx::Error> {
        let query = format!("DELETE FROM cats WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Cat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
