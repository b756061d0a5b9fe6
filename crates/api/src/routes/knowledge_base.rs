//! Route definitions for knowledge-base entries.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::knowledge_base;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(knowledge_base::list_entries).post(knowledge_base::create_entry),
        )
        .route(
            "/{id}",
            put(knowledge_base::update_entry).delete(knowledge_base::delete_entry),
        )
}
