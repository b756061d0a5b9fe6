//! Financial summary models.

use gamevault_core::types::{Cents, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Query parameters for `GET /api/financials`. Both bounds optional;
/// `from` is inclusive, `to` exclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialParams {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

/// Revenue/cost aggregates across completed commerce, for the admin
/// financial dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FinancialSummary {
    pub purchase_revenue: Cents,
    pub purchase_count: i64,
    pub rental_fee_revenue: Cents,
    pub rental_count: i64,
    /// Deposits currently held against active rentals (liability, not revenue).
    pub deposits_held: Cents,
    pub trade_fee_revenue: Cents,
    /// Net cash collected from trade differences (trade-ups minus trade-downs).
    pub trade_cash_collected: Cents,
    pub trade_count: i64,
    /// Cost of goods sold across purchased items, from `games.cost_price`.
    pub cost_of_goods_sold: Cents,
    pub gross_profit: Cents,
}
