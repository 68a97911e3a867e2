use std::sync::Arc;

use pagelayout_core::engine::LayoutEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; `None` when running on the in-memory backend.
    pub pool: Option<pagelayout_db::DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Layout resolution and save engine.
    pub engine: LayoutEngine,
}
