//! Domain-level input validation helpers.
//!
//! These complement the request-DTO `validator` derives in the API crate:
//! anything a repository or calculator relies on is re-checked here so the
//! invariants hold no matter which entry point was used.

use crate::error::CoreError;
use crate::types::Cents;

/// Minimum barcode length in digits.
pub const BARCODE_MIN_DIGITS: usize = 8;
/// Maximum barcode length in digits (EAN-14).
pub const BARCODE_MAX_DIGITS: usize = 14;

/// Maximum quantity for a single cart or order line.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Maximum listing price in cents (1,000,000.00). Keeps basis-point fee
/// arithmetic comfortably inside i64.
pub const MAX_PRICE: Cents = 100_000_000;

/// Rating scale upper bound (half-star steps, 0.0..=5.0).
pub const MAX_RATING: f64 = 5.0;

/// Check that a barcode is 8..=14 ASCII digits.
pub fn validate_barcode(barcode: &str) -> Result<(), CoreError> {
    let len = barcode.len();
    if !(BARCODE_MIN_DIGITS..=BARCODE_MAX_DIGITS).contains(&len)
        || !barcode.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(CoreError::Validation(format!(
            "Barcode must be {BARCODE_MIN_DIGITS}-{BARCODE_MAX_DIGITS} digits, got '{barcode}'"
        )));
    }
    Ok(())
}

/// Check that a price is strictly positive and at most [`MAX_PRICE`].
pub fn validate_price(price: Cents) -> Result<(), CoreError> {
    if price <= 0 {
        return Err(CoreError::Validation(format!(
            "Price must be positive, got {price}"
        )));
    }
    if price > MAX_PRICE {
        return Err(CoreError::Validation(format!(
            "Price must not exceed {MAX_PRICE} cents, got {price}"
        )));
    }
    Ok(())
}

/// Check that a cost price is non-negative (zero is allowed for donations
/// and promotional stock).
pub fn validate_cost_price(cost: Cents) -> Result<(), CoreError> {
    if cost < 0 {
        return Err(CoreError::Validation(format!(
            "Cost price must not be negative, got {cost}"
        )));
    }
    Ok(())
}

/// Check that a line quantity is within 1..=[`MAX_LINE_QUANTITY`].
pub fn validate_quantity(quantity: u32) -> Result<(), CoreError> {
    if quantity == 0 || quantity > MAX_LINE_QUANTITY {
        return Err(CoreError::Validation(format!(
            "Quantity must be 1-{MAX_LINE_QUANTITY}, got {quantity}"
        )));
    }
    Ok(())
}

/// Check that a rating lies within 0.0..=5.0.
pub fn validate_rating(rating: f64) -> Result<(), CoreError> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between 0 and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}
