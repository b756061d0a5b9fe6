//! Rental checkout and administration.
//!
//! The fee is quoted per game from its rental price basis and the chosen
//! period; the deposit is flat per order and returned when the games
//! come back.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use gamevault_core::cart::Variant;
use gamevault_core::error::CoreError;
use gamevault_core::rental::{quote_rental, RENTAL_DEPOSIT};
use gamevault_core::types::{Cents, DbId};
use gamevault_db::models::purchase::PricedLine;
use gamevault_db::models::rental::{NewRental, RENTAL_STATUSES};
use gamevault_db::repositories::{GameRepo, RentalRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::OrderListParams;
use crate::response::DataResponse;
use crate::state::AppState;

use super::purchases::check_status;

#[derive(Debug, Serialize, Deserialize)]
pub struct RentalItemInput {
    pub barcode: String,
    pub variant: Variant,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RentalRequest {
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub customer_name: String,
    #[validate(length(min = 5, max = 32, message = "must be 5-32 characters"))]
    pub customer_phone: String,
    #[validate(length(min = 1, max = 500, message = "must be 1-500 characters"))]
    pub delivery_address: String,
    /// Rental period in days, 1-30.
    pub days: u32,
    #[validate(length(min = 1, message = "must contain at least one item"))]
    pub items: Vec<RentalItemInput>,
    /// Cart session to clear after a successful checkout.
    pub session_id: Option<String>,
}

/// POST /api/rentals
///
/// One copy per item; stock is reserved in the same transaction that
/// creates the order.
pub async fn checkout(
    State(state): State<AppState>,
    Json(input): Json<RentalRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let mut lines = Vec::with_capacity(input.items.len());
    let mut fee: Cents = 0;
    let mut plan = None;

    for item in &input.items {
        let game = GameRepo::find_by_barcode(&state.pool, &item.barcode)
            .await?
            .ok_or_else(|| CoreError::not_found("Game", &item.barcode))?;
        if !game.rentable {
            return Err(CoreError::Validation(format!(
                "{} is not available for rental",
                game.barcode
            ))
            .into());
        }

        // The fee basis is the listing's dedicated rental fee when set,
        // otherwise its current selling price.
        let basis = game.rental_base_fee.unwrap_or_else(|| game.effective_price());
        let quote = quote_rental(basis, input.days)?;
        fee += quote.fee;
        plan = Some(quote.plan);

        lines.push(PricedLine {
            barcode: game.barcode,
            title: game.title,
            unit_price: basis,
            quantity: 1,
            variant: item.variant,
        });
    }

    // items is non-empty per validation, so the plan is always set.
    let plan = plan.ok_or_else(|| CoreError::Validation("No items to rent".into()))?;

    let header = NewRental {
        customer_name: input.customer_name,
        customer_phone: input.customer_phone,
        delivery_address: input.delivery_address,
        days: input.days as i32,
        plan: plan.as_str().to_string(),
        fee,
        deposit: RENTAL_DEPOSIT,
        due_at: chrono::Utc::now() + chrono::Duration::days(i64::from(input.days)),
    };

    let order = RentalRepo::create(&state.pool, &header, &lines).await?;

    if let Some(session_id) = &input.session_id {
        state.carts.remove(session_id).await;
    }

    tracing::info!(
        rental_id = order.rental.id,
        days = input.days,
        fee,
        "Rental created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// GET /api/rentals (admin)
pub async fn list_rentals(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        check_status(status, RENTAL_STATUSES)?;
    }
    let orders = RentalRepo::list(
        &state.pool,
        params.status.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/rentals/{id} (admin)
pub async fn get_rental(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = RentalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Rental", id.to_string()))?;

    Ok(Json(DataResponse { data: order }))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// PUT /api/rentals/{id}/status (admin)
///
/// Marking a rental `returned` or `cancelled` puts its copies back in
/// stock.
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdate>,
) -> AppResult<impl IntoResponse> {
    check_status(&input.status, RENTAL_STATUSES)?;

    let order = RentalRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| CoreError::not_found("Rental", id.to_string()))?;

    tracing::info!(
        rental_id = id,
        status = %input.status,
        user_id = admin.user_id,
        "Rental status updated"
    );

    Ok(Json(DataResponse { data: order }))
}
