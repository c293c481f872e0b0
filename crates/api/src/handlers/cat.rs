//! Handlers for the `/cats` resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catmander_core::error::CoreError;
use catmander_db::models::cat::{Cat, CatFilter, CreateCat, UpdateCat};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::CatListParams;
use crate::state::AppState;

/// POST /api/v1/cats
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCat>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Cat>)> {
    let Json(input) = payload?;
    if state.config.name_rule.requires_name() {
        input.validate()?;
    }
    let cat = state.store.create(&input).await?;
    tracing::info!(cat_id = %cat.id, "Cat created");
    Ok((StatusCode::CREATED, Json(cat)))
}

/// GET /api/v1/cats
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<CatListParams>, QueryRejection>,
) -> AppResult<Json<Vec<Cat>>> {
    let Query(params) = params?;
    let filter = CatFilter::from(params);
    let cats = state.store.list(&filter).await?;
    Ok(Json(cats))
}

/// GET /api/v1/cats/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Cat>> {
    let cat = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::cat_not_found(&id)))?;
    Ok(Json(cat))
}

/// PUT /api/v1/cats/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCat>, JsonRejection>,
) -> AppResult<Json<Cat>> {
    let Json(input) = payload?;
    if state.config.name_rule.requires_name() {
        input.validate()?;
    }
    let cat = state
        .store
        .update(&id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::cat_not_found(&id)))?;
    tracing::info!(cat_id = %cat.id, "Cat updated");
    Ok(Json(cat))
}

/// DELETE /api/v1/cats/{id}
///
/// Deleting a cat that does not exist is not an error: the response is
/// `200` with a `null` body.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Option<Cat>>> {
    let removed = state.store.delete(&id).await?;
    match &removed {
        Some(_) => tracing::info!(cat_id = %id, "Cat deleted"),
        None => tracing::debug!(cat_id = %id, "Delete of unknown cat ignored"),
    }
    Ok(Json(removed))
}
