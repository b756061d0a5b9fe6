//! Route definitions for the support transcript review workflow.
//!
//! ```text
//! GET  /conversations               -> list_conversations (admin)
//! GET  /conversations/{id}          -> get_conversation (admin)
//! PUT  /conversations/{id}/review   -> review_conversation (admin)
//! POST /conversations/{id}/promote  -> promote_conversation (admin)
//! GET  /analytics                   -> analytics (admin)
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::support;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(support::list_conversations))
        .route("/conversations/{id}", get(support::get_conversation))
        .route("/conversations/{id}/review", put(support::review_conversation))
        .route("/conversations/{id}/promote", post(support::promote_conversation))
        .route("/analytics", get(support::analytics))
}
