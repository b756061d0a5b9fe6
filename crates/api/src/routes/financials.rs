//! Route definitions for the financial summary.

use axum::routing::get;
use axum::Router;

use crate::handlers::financials;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(financials::summary))
}
