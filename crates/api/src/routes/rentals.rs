//! Route definitions for rental orders.
//!
//! ```text
//! POST /              -> checkout (public)
//! GET  /              -> list_rentals (admin)
//! GET  /{id}          -> get_rental (admin)
//! PUT  /{id}/status   -> update_status (admin)
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::rentals;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rentals::list_rentals).post(rentals::checkout))
        .route("/{id}", get(rentals::get_rental))
        .route("/{id}/status", put(rentals::update_status))
}
