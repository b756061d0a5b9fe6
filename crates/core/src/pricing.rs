//! Profit-margin classification and bulk percentage price updates.
//!
//! Margins are computed against the selling price: `(price - cost) / price`.
//! The bulk update preview reports the per-item outcome plus the aggregate
//! revenue delta weighted by current stock, so an admin sees the impact
//! before committing the change.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Cents;
use crate::validation::{validate_cost_price, validate_price};

/// Margins strictly below this fraction are classified `Danger`.
pub const DANGER_MARGIN: f64 = 0.05;
/// Margins strictly below this fraction (and at or above
/// [`DANGER_MARGIN`]) are classified `Warning`.
pub const WARNING_MARGIN: f64 = 0.15;

/// Lowest accepted bulk adjustment percentage.
pub const MIN_ADJUST_PERCENT: f64 = -90.0;
/// Highest accepted bulk adjustment percentage.
pub const MAX_ADJUST_PERCENT: f64 = 500.0;

/// Adjusted prices never drop below one cent.
pub const PRICE_FLOOR: Cents = 1;

/// Risk classification of a profit margin against fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginStatus {
    Safe,
    Warning,
    Danger,
}

impl MarginStatus {
    /// Classify a margin fraction. Boundary values land in the less risky
    /// band: exactly 5% is `Warning`, exactly 15% is `Safe`.
    pub fn classify(margin: f64) -> Self {
        if margin < DANGER_MARGIN {
            Self::Danger
        } else if margin < WARNING_MARGIN {
            Self::Warning
        } else {
            Self::Safe
        }
    }

    /// Stable string form used in API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Margin fraction for a listing, or `None` when the price is non-positive.
pub fn margin(price: Cents, cost: Cents) -> Option<f64> {
    if price <= 0 {
        return None;
    }
    Some((price - cost) as f64 / price as f64)
}

/// Apply a percentage change to a price, rounding half-up and flooring at
/// one cent. The percentage must lie within −90..=500.
pub fn apply_percentage(price: Cents, percent: f64) -> Result<Cents, CoreError> {
    validate_price(price)?;
    if !percent.is_finite() || !(MIN_ADJUST_PERCENT..=MAX_ADJUST_PERCENT).contains(&percent) {
        return Err(CoreError::Validation(format!(
            "Adjustment must be between {MIN_ADJUST_PERCENT}% and {MAX_ADJUST_PERCENT}%, got {percent}"
        )));
    }

    let adjusted = (price as f64 * (1.0 + percent / 100.0)).round() as Cents;
    Ok(adjusted.max(PRICE_FLOOR))
}

/// Input row for a bulk price preview: one listing with its current price,
/// cost, and units in stock across both variants.
#[derive(Debug, Clone, Deserialize)]
pub struct PricedItem {
    pub barcode: String,
    pub price: Cents,
    pub cost_price: Cents,
    pub stock: i64,
}

/// Per-item outcome of a bulk price update.
#[derive(Debug, Clone, Serialize)]
pub struct PriceChange {
    pub barcode: String,
    pub old_price: Cents,
    pub new_price: Cents,
    /// Margin fraction at the new price.
    pub margin: f64,
    pub status: MarginStatus,
}

/// Aggregate preview of a bulk price update across a set of listings.
#[derive(Debug, Clone, Serialize)]
pub struct BulkPreview {
    pub changes: Vec<PriceChange>,
    /// Sum of `(new - old) * stock` across all items, in cents.
    pub revenue_delta: Cents,
    /// Number of items whose new margin classifies as `Danger`.
    pub danger_count: usize,
    /// Number of items whose new margin classifies as `Warning`.
    pub warning_count: usize,
}

/// Compute the outcome of applying `percent` to every item.
pub fn preview_bulk_update(items: &[PricedItem], percent: f64) -> Result<BulkPreview, CoreError> {
    let mut changes = Vec::with_capacity(items.len());
    let mut revenue_delta: Cents = 0;
    let mut danger_count = 0;
    let mut warning_count = 0;

    for item in items {
        validate_cost_price(item.cost_price)?;
        let new_price = apply_percentage(item.price, percent)?;

        // new_price >= PRICE_FLOOR > 0, so margin is always defined here.
        let new_margin = margin(new_price, item.cost_price).unwrap_or(0.0);
        let status = MarginStatus::classify(new_margin);
        match status {
            MarginStatus::Danger => danger_count += 1,
            MarginStatus::Warning => warning_count += 1,
            MarginStatus::Safe => {}
        }

        revenue_delta += (new_price - item.price) * item.stock;

        changes.push(PriceChange {
            barcode: item.barcode.clone(),
            old_price: item.price,
            new_price,
            margin: new_margin,
            status,
        });
    }

    Ok(BulkPreview {
        changes,
        revenue_delta,
        danger_count,
        warning_count,
    })
}
