//! Trade submission and administration.
//!
//! The store settles a trade from the appraised value of the hand-ins and
//! the catalog price of the outgoing games. The cash difference is
//! `received - given`: positive means the customer pays the store, and a
//! flat handling fee applies either way.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use gamevault_core::cart::Variant;
use gamevault_core::error::CoreError;
use gamevault_core::trade::settle_trade;
use gamevault_core::types::{Cents, DbId};
use gamevault_db::models::trade::{
    NewTrade, PricedTradeItem, TradeDirection, TradeItemInput, TRADE_STATUSES,
};
use gamevault_db::repositories::{GameRepo, TradeRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::OrderListParams;
use crate::response::DataResponse;
use crate::state::AppState;

use super::purchases::check_status;

#[derive(Debug, Deserialize, Validate)]
pub struct TradeRequest {
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub customer_name: String,
    #[validate(length(min = 5, max = 32, message = "must be 5-32 characters"))]
    pub customer_phone: String,
    #[validate(length(min = 1, message = "must contain at least one item"))]
    pub items: Vec<TradeItemInput>,
    /// Cart session to clear after a successful submission.
    pub session_id: Option<String>,
}

/// POST /api/trades
///
/// Outgoing (`received`) items must reference tradable catalog listings
/// and are priced from the catalog; hand-ins (`given`) carry the store's
/// appraisal. Stock for outgoing items is reserved here and released if
/// the trade is later rejected or cancelled.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<TradeRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let mut items = Vec::with_capacity(input.items.len());
    let mut given_total: Cents = 0;
    let mut received_total: Cents = 0;

    for item in &input.items {
        let priced = match item.direction {
            TradeDirection::Received => {
                let barcode = item.barcode.as_deref().ok_or_else(|| {
                    CoreError::Validation(
                        "Received items must reference a catalog barcode".into(),
                    )
                })?;
                let game = GameRepo::find_by_barcode(&state.pool, barcode)
                    .await?
                    .ok_or_else(|| CoreError::not_found("Game", barcode))?;
                if !game.tradable {
                    return Err(CoreError::Validation(format!(
                        "{} is not available for trade",
                        game.barcode
                    ))
                    .into());
                }

                let value = game.effective_price();
                received_total += value;
                PricedTradeItem {
                    barcode: Some(game.barcode),
                    title: game.title,
                    value,
                    direction: TradeDirection::Received,
                    variant: item.variant.unwrap_or(Variant::CartridgeOnly),
                }
            }
            TradeDirection::Given => {
                if item.value < 0 {
                    return Err(CoreError::Validation(format!(
                        "Appraised value must not be negative, got {}",
                        item.value
                    ))
                    .into());
                }
                given_total += item.value;
                PricedTradeItem {
                    barcode: item.barcode.clone(),
                    title: item.title.clone(),
                    value: item.value,
                    direction: TradeDirection::Given,
                    variant: item.variant.unwrap_or(Variant::CartridgeOnly),
                }
            }
        };
        items.push(priced);
    }

    let settlement = settle_trade(given_total, received_total)?;

    let header = NewTrade {
        customer_name: input.customer_name,
        customer_phone: input.customer_phone,
        given_total: settlement.given_total,
        received_total: settlement.received_total,
        cash_difference: settlement.cash_difference,
        trade_fee: settlement.trade_fee,
        kind: settlement.kind.as_str().to_string(),
    };

    let trade = TradeRepo::create(&state.pool, &header, &items).await?;

    if let Some(session_id) = &input.session_id {
        state.carts.remove(session_id).await;
    }

    tracing::info!(
        trade_id = trade.trade.id,
        kind = %trade.trade.kind,
        cash_difference = trade.trade.cash_difference,
        "Trade submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: trade })))
}

/// GET /api/trades (admin)
pub async fn list_trades(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        check_status(status, TRADE_STATUSES)?;
    }
    let trades = TradeRepo::list(
        &state.pool,
        params.status.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: trades }))
}

/// GET /api/trades/{id} (admin)
pub async fn get_trade(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let trade = TradeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Trade", id.to_string()))?;

    Ok(Json(DataResponse { data: trade }))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// PUT /api/trades/{id}/status (admin)
///
/// Completing a trade stocks the hand-ins; rejecting or cancelling it
/// returns the reserved outgoing copies.
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdate>,
) -> AppResult<impl IntoResponse> {
    check_status(&input.status, TRADE_STATUSES)?;

    let trade = TradeRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| CoreError::not_found("Trade", id.to_string()))?;

    tracing::info!(
        trade_id = id,
        status = %input.status,
        user_id = admin.user_id,
        "Trade status updated"
    );

    Ok(Json(DataResponse { data: trade }))
}
