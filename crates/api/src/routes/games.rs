//! Route definitions for the game catalog.
//!
//! ```text
//! GET    /              -> list_games (public)
//! POST   /              -> create_game (admin)
//! PUT    /bulk-update   -> bulk_update_prices (admin)
//! GET    /{barcode}     -> get_game (public)
//! PUT    /{barcode}     -> update_game (admin)
//! DELETE /{barcode}     -> delete_game (admin)
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(games::list_games).post(games::create_game))
        .route("/bulk-update", put(games::bulk_update_prices))
        .route(
            "/{barcode}",
            get(games::get_game)
                .put(games::update_game)
                .delete(games::delete_game),
        )
}
