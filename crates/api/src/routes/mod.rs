pub mod cat;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /cats                 list (?isAdopted=), create
/// /cats/{id}            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/cats", cat::router())
}
