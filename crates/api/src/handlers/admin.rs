//! One-off administrative operations.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use gamevault_db::models::game::StockMigrationResult;
use gamevault_db::repositories::GameRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/admin/migrate-stocks (admin)
///
/// Backfills the pre-variant stock count into `stock_with_case` for
/// listings imported before stock was split by variant. Safe to run
/// repeatedly; already-migrated rows are skipped.
pub async fn migrate_stocks(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let games_migrated = GameRepo::migrate_legacy_stock(&state.pool).await?;

    tracing::info!(games_migrated, user_id = admin.user_id, "Legacy stock migrated");

    Ok(Json(DataResponse {
        data: StockMigrationResult { games_migrated },
    }))
}
