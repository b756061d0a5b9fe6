//! Trade settlement: cash difference, flat fee, and classification.
//!
//! A trade exchanges a set of games the customer gives to the store against
//! a set the customer receives. The cash difference is computed from the
//! appraised totals of both sides; a flat handling fee applies to every
//! trade regardless of direction.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Cents;

/// Flat handling fee charged on every trade, in cents.
pub const TRADE_FEE: Cents = 500;

/// Direction of a trade from the customer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    /// Both sides have equal appraised value.
    Even,
    /// The customer receives more value than they give and pays the difference.
    TradeUp,
    /// The customer gives more value than they receive and is paid the difference.
    TradeDown,
}

impl TradeKind {
    /// Classify from the signed cash difference (`received - given`).
    pub fn from_cash_difference(difference: Cents) -> Self {
        match difference {
            0 => Self::Even,
            d if d > 0 => Self::TradeUp,
            _ => Self::TradeDown,
        }
    }

    /// Stable string form used in the database and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Even => "even",
            Self::TradeUp => "trade_up",
            Self::TradeDown => "trade_down",
        }
    }
}

/// Result of settling a trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeSettlement {
    pub given_total: Cents,
    pub received_total: Cents,
    /// `received_total - given_total`. Positive: the customer pays.
    pub cash_difference: Cents,
    pub trade_fee: Cents,
    pub kind: TradeKind,
}

/// Settle a trade from the appraised totals of both sides.
///
/// Totals must be non-negative cent amounts.
pub fn settle_trade(given_total: Cents, received_total: Cents) -> Result<TradeSettlement, CoreError> {
    if given_total < 0 || received_total < 0 {
        return Err(CoreError::Validation(format!(
            "Trade totals must not be negative (given {given_total}, received {received_total})"
        )));
    }

    let cash_difference = received_total - given_total;

    Ok(TradeSettlement {
        given_total,
        received_total,
        cash_difference,
        trade_fee: TRADE_FEE,
        kind: TradeKind::from_cash_difference(cash_difference),
    })
}
