//! Purchase checkout and order administration.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use gamevault_core::error::CoreError;
use gamevault_core::types::{Cents, DbId};
use gamevault_core::validation::validate_quantity;
use gamevault_db::models::purchase::{
    CheckoutItem, NewPurchase, PricedLine, PURCHASE_STATUSES,
};
use gamevault_db::repositories::{GameRepo, PurchaseRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::OrderListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub customer_name: String,
    #[validate(length(min = 5, max = 32, message = "must be 5-32 characters"))]
    pub customer_phone: String,
    #[validate(length(min = 1, max = 500, message = "must be 1-500 characters"))]
    pub delivery_address: String,
    #[validate(length(min = 1, max = 60, message = "must be 1-60 characters"))]
    pub delivery_method: String,
    pub note: Option<String>,
    #[validate(length(min = 1, message = "must contain at least one item"))]
    pub items: Vec<CheckoutItem>,
    /// Cart session to clear after a successful checkout.
    pub session_id: Option<String>,
}

/// Re-price checkout items from the current catalog. Client-supplied
/// prices are never trusted.
pub(crate) async fn price_lines(
    state: &AppState,
    items: &[CheckoutItem],
) -> AppResult<(Vec<PricedLine>, Cents)> {
    let mut lines = Vec::with_capacity(items.len());
    let mut total: Cents = 0;

    for item in items {
        validate_quantity(item.quantity)?;
        let game = GameRepo::find_by_barcode(&state.pool, &item.barcode)
            .await?
            .ok_or_else(|| CoreError::not_found("Game", &item.barcode))?;

        let unit_price = game.effective_price();
        total += unit_price * i64::from(item.quantity);
        lines.push(PricedLine {
            barcode: game.barcode,
            title: game.title,
            unit_price,
            quantity: item.quantity,
            variant: item.variant,
        });
    }

    Ok((lines, total))
}

/// POST /api/purchases
///
/// Creates the order and decrements stock in one transaction; any line
/// without enough stock rolls everything back with a 409.
pub async fn checkout(
    State(state): State<AppState>,
    Json(input): Json<CheckoutRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let (lines, total) = price_lines(&state, &input.items).await?;

    let header = NewPurchase {
        customer_name: input.customer_name,
        customer_phone: input.customer_phone,
        delivery_address: input.delivery_address,
        delivery_method: input.delivery_method,
        note: input.note,
        total,
    };

    let order = PurchaseRepo::create(&state.pool, &header, &lines).await?;

    if let Some(session_id) = &input.session_id {
        state.carts.remove(session_id).await;
    }

    tracing::info!(purchase_id = order.purchase.id, total, "Purchase created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// GET /api/purchases (admin)
pub async fn list_purchases(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        check_status(status, PURCHASE_STATUSES)?;
    }
    let orders = PurchaseRepo::list(
        &state.pool,
        params.status.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/purchases/{id} (admin)
pub async fn get_purchase(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = PurchaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Purchase", id.to_string()))?;

    Ok(Json(DataResponse { data: order }))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// PUT /api/purchases/{id}/status (admin)
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdate>,
) -> AppResult<impl IntoResponse> {
    check_status(&input.status, PURCHASE_STATUSES)?;

    let order = PurchaseRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| CoreError::not_found("Purchase", id.to_string()))?;

    tracing::info!(
        purchase_id = id,
        status = %input.status,
        user_id = admin.user_id,
        "Purchase status updated"
    );

    Ok(Json(DataResponse { data: order }))
}

/// Reject statuses outside the fixed lifecycle vocabulary.
pub(crate) fn check_status(status: &str, allowed: &[&str]) -> Result<(), AppError> {
    if allowed.contains(&status) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Unknown status {status:?}; expected one of {allowed:?}"
        )))
    }
}
