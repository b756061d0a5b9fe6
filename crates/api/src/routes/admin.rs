//! Route definitions for administrative operations.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/migrate-stocks", post(admin::migrate_stocks))
}
