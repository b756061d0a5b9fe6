//! Route definitions for the per-session cart.
//!
//! ```text
//! GET    /{session_id}                            -> get_cart
//! DELETE /{session_id}                            -> clear_cart
//! POST   /{session_id}/items                      -> add_item
//! PUT    /{session_id}/items                      -> update_item
//! DELETE /{session_id}/items/{barcode}/{variant}  -> remove_item
//! PUT    /{session_id}/mode                       -> set_mode
//! ```

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{session_id}",
            get(cart::get_cart).delete(cart::clear_cart),
        )
        .route(
            "/{session_id}/items",
            post(cart::add_item).put(cart::update_item),
        )
        .route(
            "/{session_id}/items/{barcode}/{variant}",
            delete(cart::remove_item),
        )
        .route("/{session_id}/mode", put(cart::set_mode))
}
