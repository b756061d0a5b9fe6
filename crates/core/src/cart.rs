//! Per-session cart state and mutation operations.
//!
//! A cart is scoped to one of three checkout flows (purchase, rental,
//! trade). Lines are keyed by `(barcode, variant)`; adding an existing key
//! merges quantities, and switching the cart mode discards the contents
//! since the flows price items differently.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Cents;
use crate::validation::MAX_LINE_QUANTITY;

/// Which checkout flow a cart belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartMode {
    Purchase,
    Rental,
    Trade,
}

/// Stock sub-type of a listing. Tracked separately per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[serde(rename = "withCase")]
    WithCase,
    #[serde(rename = "cartridgeOnly")]
    CartridgeOnly,
}

impl Variant {
    /// Stable string form used in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WithCase => "withCase",
            Self::CartridgeOnly => "cartridgeOnly",
        }
    }
}

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub barcode: String,
    pub title: String,
    pub unit_price: Cents,
    pub quantity: u32,
    pub variant: Variant,
    pub tradable: bool,
}

/// Aggregate view of a cart's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub item_count: u32,
    pub subtotal: Cents,
}

/// A session's cart: a mode plus its lines.
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub mode: CartMode,
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(mode: CartMode) -> Self {
        Self {
            mode,
            lines: Vec::new(),
        }
    }

    fn position(&self, barcode: &str, variant: Variant) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.barcode == barcode && l.variant == variant)
    }

    /// Add a line, merging quantity into an existing `(barcode, variant)`
    /// line if present. Quantities clamp at [`MAX_LINE_QUANTITY`].
    pub fn add_item(&mut self, line: CartLine) -> Result<(), CoreError> {
        if line.quantity == 0 {
            return Err(CoreError::Validation("Quantity must be at least 1".into()));
        }
        match self.position(&line.barcode, line.variant) {
            Some(i) => {
                let existing = &mut self.lines[i];
                existing.quantity =
                    (existing.quantity + line.quantity).min(MAX_LINE_QUANTITY);
            }
            None => {
                let mut line = line;
                line.quantity = line.quantity.min(MAX_LINE_QUANTITY);
                self.lines.push(line);
            }
        }
        Ok(())
    }

    /// Remove a line. Returns `false` if no such line existed.
    pub fn remove_item(&mut self, barcode: &str, variant: Variant) -> bool {
        match self.position(barcode, variant) {
            Some(i) => {
                self.lines.remove(i);
                true
            }
            None => false,
        }
    }

    /// Set a line's quantity. Zero removes the line; other values clamp to
    /// 1..=[`MAX_LINE_QUANTITY`]. Returns `false` if no such line existed.
    pub fn update_quantity(&mut self, barcode: &str, variant: Variant, quantity: u32) -> bool {
        let Some(i) = self.position(barcode, variant) else {
            return false;
        };
        if quantity == 0 {
            self.lines.remove(i);
        } else {
            self.lines[i].quantity = quantity.min(MAX_LINE_QUANTITY);
        }
        true
    }

    /// Move a line to a different variant. If a line for the target variant
    /// already exists, the quantities merge into it. Returns `false` if the
    /// source line does not exist.
    pub fn update_variant(&mut self, barcode: &str, from: Variant, to: Variant) -> bool {
        if from == to {
            return self.position(barcode, from).is_some();
        }
        let Some(src) = self.position(barcode, from) else {
            return false;
        };
        match self.position(barcode, to) {
            Some(dst) => {
                let moved = self.lines[src].quantity;
                self.lines[dst].quantity =
                    (self.lines[dst].quantity + moved).min(MAX_LINE_QUANTITY);
                self.lines.remove(src);
            }
            None => self.lines[src].variant = to,
        }
        true
    }

    /// Switch the cart to a different flow. Changing mode clears the lines.
    pub fn set_mode(&mut self, mode: CartMode) {
        if self.mode != mode {
            self.mode = mode;
            self.lines.clear();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.lines.iter().map(|l| l.quantity).sum(),
            subtotal: self
                .lines
                .iter()
                .map(|l| l.unit_price * i64::from(l.quantity))
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(barcode: &str, qty: u32, variant: Variant) -> CartLine {
        CartLine {
            barcode: barcode.into(),
            title: format!("Game {barcode}"),
            unit_price: 3000,
            quantity: qty,
            variant,
            tradable: true,
        }
    }

    #[test]
    fn add_merges_same_barcode_and_variant() {
        let mut cart = Cart::new(CartMode::Purchase);
        cart.add_item(line("40000001", 1, Variant::WithCase)).unwrap();
        cart.add_item(line("40000001", 2, Variant::WithCase)).unwrap();

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 3);
    }

    #[test]
    fn different_variants_are_separate_lines() {
        let mut cart = Cart::new(CartMode::Purchase);
        cart.add_item(line("40000001", 1, Variant::WithCase)).unwrap();
        cart.add_item(line("40000001", 1, Variant::CartridgeOnly)).unwrap();

        assert_eq!(cart.lines.len(), 2);
    }

    #[test]
    fn add_rejects_zero_quantity() {
        let mut cart = Cart::new(CartMode::Purchase);
        assert!(cart.add_item(line("40000001", 0, Variant::WithCase)).is_err());
    }

    #[test]
    fn merge_clamps_at_max_quantity() {
        let mut cart = Cart::new(CartMode::Purchase);
        cart.add_item(line("40000001", 98, Variant::WithCase)).unwrap();
        cart.add_item(line("40000001", 5, Variant::WithCase)).unwrap();

        assert_eq!(cart.lines[0].quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn update_quantity_zero_removes_line() {
        let mut cart = Cart::new(CartMode::Purchase);
        cart.add_item(line("40000001", 2, Variant::WithCase)).unwrap();

        assert!(cart.update_quantity("40000001", Variant::WithCase, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_unknown_line_is_noop() {
        let mut cart = Cart::new(CartMode::Purchase);
        assert!(!cart.update_quantity("40000001", Variant::WithCase, 2));
    }

    #[test]
    fn update_variant_moves_line() {
        let mut cart = Cart::new(CartMode::Purchase);
        cart.add_item(line("40000001", 2, Variant::WithCase)).unwrap();

        assert!(cart.update_variant("40000001", Variant::WithCase, Variant::CartridgeOnly));
        assert_eq!(cart.lines[0].variant, Variant::CartridgeOnly);
    }

    #[test]
    fn update_variant_merges_into_existing_target() {
        let mut cart = Cart::new(CartMode::Purchase);
        cart.add_item(line("40000001", 2, Variant::WithCase)).unwrap();
        cart.add_item(line("40000001", 3, Variant::CartridgeOnly)).unwrap();

        assert!(cart.update_variant("40000001", Variant::WithCase, Variant::CartridgeOnly));
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 5);
    }

    #[test]
    fn switching_mode_clears_cart() {
        let mut cart = Cart::new(CartMode::Purchase);
        cart.add_item(line("40000001", 1, Variant::WithCase)).unwrap();

        cart.set_mode(CartMode::Trade);
        assert!(cart.is_empty());
        assert_eq!(cart.mode, CartMode::Trade);
    }

    #[test]
    fn setting_same_mode_keeps_contents() {
        let mut cart = Cart::new(CartMode::Rental);
        cart.add_item(line("40000001", 1, Variant::WithCase)).unwrap();

        cart.set_mode(CartMode::Rental);
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn totals_sum_quantity_and_subtotal() {
        let mut cart = Cart::new(CartMode::Purchase);
        cart.add_item(line("40000001", 2, Variant::WithCase)).unwrap();
        cart.add_item(line("40000002", 1, Variant::CartridgeOnly)).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal, 9000);
    }
}
