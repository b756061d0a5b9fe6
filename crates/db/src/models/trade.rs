//! Trade order models and DTOs.

use gamevault_core::types::{Cents, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Allowed trade statuses.
pub const TRADE_STATUSES: &[&str] = &["pending", "accepted", "rejected", "completed", "cancelled"];

/// A row from the `trades` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trade {
    pub id: DbId,
    pub customer_name: String,
    pub customer_phone: String,
    pub given_total: Cents,
    pub received_total: Cents,
    /// `received_total - given_total`; positive means the customer pays.
    pub cash_difference: Cents,
    pub trade_fee: Cents,
    pub kind: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `trade_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TradeItem {
    pub id: DbId,
    pub trade_id: DbId,
    /// Absent for hand-ins that are not in the catalog yet.
    pub barcode: Option<String>,
    pub title: String,
    pub value: Cents,
    pub direction: String,
    pub variant: String,
}

/// A trade together with its items.
#[derive(Debug, Clone, Serialize)]
pub struct TradeWithItems {
    #[serde(flatten)]
    pub trade: Trade,
    pub items: Vec<TradeItem>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Side of a trade a submitted item belongs to, from the customer's
/// perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    /// Customer hands the game to the store.
    Given,
    /// Customer takes the game from store stock.
    Received,
}

impl TradeDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::Received => "received",
        }
    }
}

/// One line of a trade submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeItemInput {
    pub barcode: Option<String>,
    pub title: String,
    /// Appraised value in cents. For `received` items this is overwritten
    /// with the catalog's effective price.
    pub value: Cents,
    pub direction: TradeDirection,
    /// Stock variant; hand-ins default to cartridge-only.
    pub variant: Option<gamevault_core::cart::Variant>,
}

/// Priced trade line ready for insertion.
#[derive(Debug, Clone)]
pub struct PricedTradeItem {
    pub barcode: Option<String>,
    pub title: String,
    pub value: Cents,
    pub direction: TradeDirection,
    pub variant: gamevault_core::cart::Variant,
}

/// Header fields for a new trade row, from the server-side settlement.
#[derive(Debug, Clone)]
pub struct NewTrade {
    pub customer_name: String,
    pub customer_phone: String,
    pub given_total: Cents,
    pub received_total: Cents,
    pub cash_difference: Cents,
    pub trade_fee: Cents,
    pub kind: String,
}
