//! Route definitions for image uploads.

use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload::upload_image))
}
