//! Purchase order models and DTOs.

use gamevault_core::cart::Variant;
use gamevault_core::types::{Cents, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Allowed purchase statuses, in lifecycle order.
pub const PURCHASE_STATUSES: &[&str] =
    &["pending", "confirmed", "shipped", "completed", "cancelled"];

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `purchases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Purchase {
    pub id: DbId,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub delivery_method: String,
    pub note: Option<String>,
    pub status: String,
    pub total: Cents,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `purchase_items` table: a price snapshot taken at
/// checkout, deliberately denormalized from `games`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PurchaseItem {
    pub id: DbId,
    pub purchase_id: DbId,
    pub barcode: String,
    pub title: String,
    pub unit_price: Cents,
    pub quantity: i32,
    pub variant: String,
}

/// A purchase together with its item snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseWithItems {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub items: Vec<PurchaseItem>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// One line of a checkout request. Prices are looked up server-side and
/// never taken from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub barcode: String,
    pub quantity: u32,
    pub variant: Variant,
}

/// Priced line ready for insertion, produced by the handler after price
/// lookup and stock checks.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub barcode: String,
    pub title: String,
    pub unit_price: Cents,
    pub quantity: u32,
    pub variant: Variant,
}

/// Header fields for a new purchase row; the total is recomputed by the
/// handler from current catalog prices.
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub delivery_method: String,
    pub note: Option<String>,
    pub total: Cents,
}
