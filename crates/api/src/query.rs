//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Pagination plus an optional status filter, shared by the order listing
/// endpoints (purchases, rentals, trades).
///
/// Limit and offset are clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
