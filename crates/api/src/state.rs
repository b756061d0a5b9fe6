use std::sync::Arc;

use crate::carts::CartStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gamevault_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// In-memory per-session shopping carts.
    pub carts: Arc<CartStore>,
}
