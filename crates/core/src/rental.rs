//! Rental quoting: tiered fee bands plus a flat refundable deposit.
//!
//! | Days    | Plan    | Fee                          |
//! |---------|---------|------------------------------|
//! | 1..=3   | daily   | 10% of price per day         |
//! | 4..=14  | weekly  | 25% of price per started week |
//! | 15..=30 | monthly | 60% of price, flat           |
//!
//! Day counts outside 1..=30 are rejected.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Cents;
use crate::validation::validate_price;

/// Flat refundable deposit in cents, identical for every plan.
pub const RENTAL_DEPOSIT: Cents = 2000;

/// Longest supported rental period in days.
pub const MAX_RENTAL_DAYS: u32 = 30;

/// Daily plan rate in basis points of the game price, per day.
pub const DAILY_RATE_BP: i64 = 1000;
/// Weekly plan rate in basis points of the game price, per started week.
pub const WEEKLY_RATE_BP: i64 = 2500;
/// Monthly plan flat rate in basis points of the game price.
pub const MONTHLY_RATE_BP: i64 = 6000;

/// Rental plan selected from the requested day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalPlan {
    Daily,
    Weekly,
    Monthly,
}

impl RentalPlan {
    /// Select the plan for a day count already known to be in 1..=30.
    fn for_days(days: u32) -> Self {
        match days {
            1..=3 => Self::Daily,
            4..=14 => Self::Weekly,
            _ => Self::Monthly,
        }
    }

    /// Stable string form used in the database and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily rental",
            Self::Weekly => "Weekly rental",
            Self::Monthly => "Monthly rental",
        }
    }
}

/// A priced rental offer for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalQuote {
    pub plan: RentalPlan,
    /// Display label for the selected plan.
    pub plan_label: &'static str,
    pub days: u32,
    pub fee: Cents,
    pub deposit: Cents,
}

/// Apply a basis-point rate to a price, rounding half-up to whole cents.
fn rate_fee(price: Cents, basis_points: i64) -> Cents {
    (price * basis_points + 5000) / 10_000
}

/// Quote a rental for a game at `price` cents over `days` days.
pub fn quote_rental(price: Cents, days: u32) -> Result<RentalQuote, CoreError> {
    validate_price(price)?;
    if days == 0 || days > MAX_RENTAL_DAYS {
        return Err(CoreError::Validation(format!(
            "Rental period must be 1-{MAX_RENTAL_DAYS} days, got {days}"
        )));
    }

    let plan = RentalPlan::for_days(days);
    let fee = match plan {
        RentalPlan::Daily => rate_fee(price, DAILY_RATE_BP) * i64::from(days),
        RentalPlan::Weekly => {
            let started_weeks = i64::from(days.div_ceil(7));
            rate_fee(price, WEEKLY_RATE_BP) * started_weeks
        }
        RentalPlan::Monthly => rate_fee(price, MONTHLY_RATE_BP),
    };

    Ok(RentalQuote {
        plan,
        plan_label: plan.label(),
        days,
        fee,
        deposit: RENTAL_DEPOSIT,
    })
}
