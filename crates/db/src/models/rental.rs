//! Rental order models.

use gamevault_core::types::{Cents, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Allowed rental statuses.
pub const RENTAL_STATUSES: &[&str] = &["active", "returned", "overdue", "cancelled"];

/// A row from the `rentals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rental {
    pub id: DbId,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub days: i32,
    pub plan: String,
    pub fee: Cents,
    pub deposit: Cents,
    pub due_at: Timestamp,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `rental_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RentalItem {
    pub id: DbId,
    pub rental_id: DbId,
    pub barcode: String,
    pub title: String,
    pub unit_price: Cents,
    pub variant: String,
}

/// A rental together with its item snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct RentalWithItems {
    #[serde(flatten)]
    pub rental: Rental,
    pub items: Vec<RentalItem>,
}

/// Header fields for a new rental row; fee, deposit, plan, and due date
/// come from the server-side quote, never from the client.
#[derive(Debug, Clone)]
pub struct NewRental {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub days: i32,
    pub plan: String,
    pub fee: Cents,
    pub deposit: Cents,
    pub due_at: Timestamp,
}
