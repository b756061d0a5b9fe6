//! Route definitions for purchase orders.
//!
//! ```text
//! POST /              -> checkout (public)
//! GET  /              -> list_purchases (admin)
//! GET  /{id}          -> get_purchase (admin)
//! PUT  /{id}/status   -> update_status (admin)
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::purchases;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(purchases::list_purchases).post(purchases::checkout),
        )
        .route("/{id}", get(purchases::get_purchase))
        .route("/{id}/status", put(purchases::update_status))
}
