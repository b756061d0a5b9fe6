//! The admin financial summary.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use gamevault_db::models::financials::FinancialParams;
use gamevault_db::repositories::FinancialRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/financials (admin)
///
/// Revenue/cost aggregates over an optional `[from, to)` window on order
/// creation time.
pub async fn summary(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<FinancialParams>,
) -> AppResult<impl IntoResponse> {
    if let (Some(from), Some(to)) = (params.from, params.to) {
        if from >= to {
            return Err(AppError::BadRequest("from must be before to".into()));
        }
    }

    let summary = FinancialRepo::summary(&state.pool, params.from, params.to).await?;
    Ok(Json(DataResponse { data: summary }))
}
