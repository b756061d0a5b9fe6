//! Handlers for the game catalog: CRUD, search, and bulk price updates
//! with profit-margin guardrails.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use gamevault_core::error::CoreError;
use gamevault_core::pricing::{preview_bulk_update, BulkPreview};
use gamevault_core::validation::{
    validate_barcode, validate_cost_price, validate_price, validate_rating,
};
use gamevault_db::models::game::{BulkPriceUpdate, CreateGame, GameListParams, UpdateGame};
use gamevault_db::repositories::GameRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upper bound on barcodes in one bulk update request.
const MAX_BULK_BARCODES: usize = 200;

// ---------------------------------------------------------------------------
// Catalog CRUD
// ---------------------------------------------------------------------------

/// GET /api/games
///
/// List/search the catalog with filters, sort, and pagination.
pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<GameListParams>,
) -> AppResult<impl IntoResponse> {
    let games = GameRepo::list(&state.pool, &params).await?;

    Ok(Json(DataResponse { data: games }))
}

/// GET /api/games/{barcode}
pub async fn get_game(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<impl IntoResponse> {
    let game = GameRepo::find_by_barcode(&state.pool, &barcode)
        .await?
        .ok_or_else(|| CoreError::not_found("Game", &barcode))?;

    Ok(Json(DataResponse { data: game }))
}

/// POST /api/games
///
/// Create a listing. Admin only. Duplicate barcodes map to 409 via the
/// `uq_games_barcode` constraint.
pub async fn create_game(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGame>,
) -> AppResult<impl IntoResponse> {
    validate_barcode(&input.barcode)?;
    validate_price(input.price)?;
    validate_cost_price(input.cost_price)?;
    validate_rating(input.rating)?;
    if let Some(sale) = input.sale_price {
        validate_price(sale)?;
    }

    let game = GameRepo::create(&state.pool, &input).await?;

    tracing::info!(barcode = %game.barcode, user_id = admin.user_id, "Game created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// PUT /api/games/{barcode}
///
/// Partially update a listing. Admin only.
pub async fn update_game(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(barcode): Path<String>,
    Json(input): Json<UpdateGame>,
) -> AppResult<impl IntoResponse> {
    if let Some(price) = input.price {
        validate_price(price)?;
    }
    if let Some(cost) = input.cost_price {
        validate_cost_price(cost)?;
    }
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }

    let game = GameRepo::update(&state.pool, &barcode, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Game", &barcode))?;

    tracing::info!(barcode = %barcode, user_id = admin.user_id, "Game updated");

    Ok(Json(DataResponse { data: game }))
}

/// DELETE /api/games/{barcode}
///
/// Remove a listing. Admin only.
pub async fn delete_game(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = GameRepo::delete(&state.pool, &barcode).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Game", &barcode)));
    }

    tracing::info!(barcode = %barcode, user_id = admin.user_id, "Game deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Bulk price update
// ---------------------------------------------------------------------------

/// Response for the bulk update endpoint: the margin preview plus whether
/// it was applied.
#[derive(Debug, Serialize)]
pub struct BulkUpdateResponse {
    #[serde(flatten)]
    pub preview: BulkPreview,
    pub applied: bool,
    pub updated: u64,
}

/// PUT /api/games/bulk-update
///
/// Apply a percentage price change to a set of listings. Admin only.
/// With `dry_run: true` the response carries the preview (new prices,
/// margin statuses, revenue delta) without writing anything.
pub async fn bulk_update_prices(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<BulkPriceUpdate>,
) -> AppResult<impl IntoResponse> {
    if input.barcodes.is_empty() {
        return Err(AppError::BadRequest("barcodes must not be empty".into()));
    }
    if input.barcodes.len() > MAX_BULK_BARCODES {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_BULK_BARCODES} barcodes per bulk update"
        )));
    }

    // Repeated barcodes count once; the query returns each row once anyway.
    let mut seen = std::collections::HashSet::new();
    let mut barcodes = input.barcodes;
    barcodes.retain(|b| seen.insert(b.clone()));

    let items = GameRepo::fetch_pricing_inputs(&state.pool, &barcodes).await?;
    if items.len() != barcodes.len() {
        let known: std::collections::HashSet<&str> =
            items.iter().map(|i| i.barcode.as_str()).collect();
        let missing = barcodes
            .iter()
            .find(|b| !known.contains(b.as_str()))
            .cloned()
            .unwrap_or_default();
        return Err(AppError::Core(CoreError::not_found("Game", missing)));
    }

    let preview = preview_bulk_update(&items, input.percent)?;

    let (applied, updated) = if input.dry_run {
        (false, 0)
    } else {
        let written = GameRepo::apply_price_changes(&state.pool, &preview.changes).await?;
        (true, written)
    };

    tracing::info!(
        count = preview.changes.len(),
        percent = input.percent,
        applied,
        user_id = admin.user_id,
        "Bulk price update"
    );

    Ok(Json(DataResponse {
        data: BulkUpdateResponse {
            preview,
            applied,
            updated,
        },
    }))
}
