//! Route definitions for trade orders.
//!
//! ```text
//! POST /              -> submit (public)
//! GET  /              -> list_trades (admin)
//! GET  /{id}          -> get_trade (admin)
//! PUT  /{id}/status   -> update_status (admin)
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::trades;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trades::list_trades).post(trades::submit))
        .route("/{id}", get(trades::get_trade))
        .route("/{id}/status", put(trades::update_status))
}
