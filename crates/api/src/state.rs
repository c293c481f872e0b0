use std::sync::Arc;

use catmander_db::store::CatStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store backing `/cats` (PostgreSQL or in-memory).
    pub store: Arc<dyn CatStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
