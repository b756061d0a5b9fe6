//! Handlers for the per-session cart.
//!
//! The cart is a browsing convenience: every mutation responds with the
//! full updated cart so the storefront never has to reconcile state.
//! Prices shown here are snapshots; checkout re-prices from the catalog.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use gamevault_core::cart::{Cart, CartMode, CartLine, CartTotals, Variant};
use gamevault_core::error::CoreError;
use gamevault_db::models::game::Game;
use gamevault_db::repositories::GameRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A cart plus its derived totals, as returned by every cart endpoint.
#[derive(Debug, Serialize)]
pub struct CartView {
    #[serde(flatten)]
    pub cart: Cart,
    pub totals: CartTotals,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        let totals = cart.totals();
        CartView { cart, totals }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub barcode: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub variant: Variant,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub barcode: String,
    pub variant: Variant,
    /// New quantity; zero removes the line.
    pub quantity: Option<u32>,
    /// Move the line to this variant (merging into an existing line).
    pub new_variant: Option<Variant>,
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: CartMode,
}

/// GET /api/cart/{session_id}
pub async fn get_cart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let cart = state.carts.get(&session_id).await;
    Ok(Json(DataResponse {
        data: CartView::from(cart),
    }))
}

/// DELETE /api/cart/{session_id}
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.carts.remove(&session_id).await;
    let cart = state.carts.get(&session_id).await;
    Ok(Json(DataResponse {
        data: CartView::from(cart),
    }))
}

/// POST /api/cart/{session_id}/items
///
/// Adds a listing to the cart, merging with an existing line for the same
/// barcode and variant. The flow the cart is in gates what may enter it:
/// rental carts take rentable listings, trade carts take tradable ones.
pub async fn add_item(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(input): Json<AddItemRequest>,
) -> AppResult<impl IntoResponse> {
    gamevault_core::validation::validate_quantity(input.quantity)?;

    let game = GameRepo::find_by_barcode(&state.pool, &input.barcode)
        .await?
        .ok_or_else(|| CoreError::not_found("Game", &input.barcode))?;

    let (cart, result) = state
        .carts
        .with_cart(&session_id, |cart| {
            check_mode_allows(cart.mode, &game)?;
            cart.add_item(CartLine {
                barcode: game.barcode.clone(),
                title: game.title.clone(),
                unit_price: game.effective_price(),
                quantity: input.quantity,
                variant: input.variant,
                tradable: game.tradable,
            })
        })
        .await;
    result?;

    Ok(Json(DataResponse {
        data: CartView::from(cart),
    }))
}

/// PUT /api/cart/{session_id}/items
///
/// Updates a line's quantity and/or moves it to another variant.
pub async fn update_item(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(input): Json<UpdateItemRequest>,
) -> AppResult<impl IntoResponse> {
    let (cart, found) = state
        .carts
        .with_cart(&session_id, |cart| {
            let mut found = true;
            if let Some(to) = input.new_variant {
                found &= cart.update_variant(&input.barcode, input.variant, to);
            }
            if let Some(quantity) = input.quantity {
                let variant = input.new_variant.unwrap_or(input.variant);
                found &= cart.update_quantity(&input.barcode, variant, quantity);
            }
            found
        })
        .await;

    if !found {
        return Err(AppError::Core(CoreError::not_found(
            "Cart item",
            input.barcode,
        )));
    }

    Ok(Json(DataResponse {
        data: CartView::from(cart),
    }))
}

/// DELETE /api/cart/{session_id}/items/{barcode}/{variant}
pub async fn remove_item(
    State(state): State<AppState>,
    Path((session_id, barcode, variant)): Path<(String, String, Variant)>,
) -> AppResult<impl IntoResponse> {
    let (cart, found) = state
        .carts
        .with_cart(&session_id, |cart| cart.remove_item(&barcode, variant))
        .await;

    if !found {
        return Err(AppError::Core(CoreError::not_found("Cart item", barcode)));
    }

    Ok(Json(DataResponse {
        data: CartView::from(cart),
    }))
}

/// PUT /api/cart/{session_id}/mode
///
/// Switches the cart between the purchase, rental, and trade flows.
/// Changing mode clears the lines.
pub async fn set_mode(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(input): Json<SetModeRequest>,
) -> AppResult<impl IntoResponse> {
    let (cart, _) = state
        .carts
        .with_cart(&session_id, |cart| cart.set_mode(input.mode))
        .await;

    Ok(Json(DataResponse {
        data: CartView::from(cart),
    }))
}

/// Listings must opt in to the rental and trade flows.
fn check_mode_allows(mode: CartMode, game: &Game) -> Result<(), CoreError> {
    match mode {
        CartMode::Purchase => Ok(()),
        CartMode::Rental if game.rentable => Ok(()),
        CartMode::Rental => Err(CoreError::Validation(format!(
            "{} is not available for rental",
            game.barcode
        ))),
        CartMode::Trade if game.tradable => Ok(()),
        CartMode::Trade => Err(CoreError::Validation(format!(
            "{} is not available for trade",
            game.barcode
        ))),
    }
}
