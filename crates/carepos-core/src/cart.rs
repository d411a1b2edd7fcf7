//! # Cart Engine
//!
//! Maintains the working set of line items for the current, uncommitted
//! sale.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                Session Call              Cart Change         │
//! │  ─────────                ────────────              ───────────         │
//! │                                                                         │
//! │  Pick medicine ─────────► add_item() ─────────────► line merged/added   │
//! │                                                                         │
//! │  +/- stepper ───────────► update_quantity() ──────► clamped to stock    │
//! │                                                                         │
//! │  Trash icon ────────────► remove_item() ──────────► line removed        │
//! │                                                                         │
//! │  Clear bill ────────────► clear() ────────────────► lines emptied       │
//! │                                                                         │
//! │  Summary panel ─────────► totals() ───────────────► (read only)         │
//! │                                                                         │
//! │  Every successful mutation is followed by a cart-recovery save in       │
//! │  the session layer, so a reload can resume an interrupted sale.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `medicine_id` (adding the same medicine merges)
//! - Every line quantity stays within `1..=max_stock`, where `max_stock`
//!   is the stock snapshot captured when the line was added
//! - Line totals are always computed from `unit_price × quantity`, never
//!   stored or mutated independently
//! - A failed operation leaves the cart exactly as it was

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::validate_cart_quantity;
use crate::{BILL_TAX_RATE_BPS, MAX_CART_LINES};

// =============================================================================
// Cart Line
// =============================================================================

/// One medicine on the working bill.
///
/// ## Design Notes
/// - `name` and `unit_price_paise` are frozen copies taken when the line
///   was added, so the bill table displays consistent data even if the
///   inventory record is edited mid-sale
/// - `max_stock` is the availability snapshot the line was admitted
///   against; quantity updates clamp to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Inventory record id (UUID).
    pub medicine_id: String,

    /// Medicine name at time of adding (frozen).
    pub name: String,

    /// Price in paise at time of adding (frozen).
    pub unit_price_paise: i64,

    /// Quantity on the bill. Always within `1..=max_stock`.
    pub quantity: i64,

    /// Stock snapshot captured when the line was added.
    pub max_stock: i64,
}

impl CartLine {
    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.unit_price_paise).multiply_quantity(self.quantity)
    }

    /// Line total in raw paise, for serialization boundaries.
    #[inline]
    pub fn line_total_paise(&self) -> i64 {
        self.line_total().paise()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Totals summary for the bill panel.
///
/// `total = subtotal + tax − discount`. The discount is not clamped, so
/// the total can be negative when the discount exceeds subtotal + tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub subtotal_paise: i64,
    pub tax_paise: i64,
    pub discount_paise: i64,
    pub total_paise: i64,
}

// =============================================================================
// Cart
// =============================================================================

/// The working, uncommitted set of lines for one sale.
///
/// The cart is a plain value owned by one billing session - no globals,
/// no interior locking. Concurrent views each own their own cart and
/// reconcile through re-fetch signals, not shared state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a medicine to the cart or merges into its existing line.
    ///
    /// ## Behavior
    /// - Rejects non-positive quantities with a validation error
    /// - Rejects quantities beyond `available_stock` - on the merge path
    ///   the EXISTING quantity counts against the snapshot too
    /// - On merge, the line's stock snapshot is refreshed to the supplied
    ///   value (the caller just fetched it)
    ///
    /// ## Errors
    /// - `CoreError::Validation` - `quantity <= 0`
    /// - `CoreError::InsufficientStock` - merged quantity would exceed stock
    /// - `CoreError::CartTooLarge` - cart already holds `MAX_CART_LINES`
    pub fn add_line(
        &mut self,
        medicine_id: &str,
        name: &str,
        unit_price: Money,
        quantity: i64,
        available_stock: i64,
    ) -> CoreResult<()> {
        validate_cart_quantity(quantity)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.medicine_id == medicine_id) {
            let merged = line.quantity + quantity;
            if merged > available_stock {
                return Err(CoreError::InsufficientStock {
                    name: line.name.clone(),
                    available: available_stock,
                    requested: merged,
                });
            }
            line.quantity = merged;
            line.max_stock = available_stock;
            return Ok(());
        }

        if quantity > available_stock {
            return Err(CoreError::InsufficientStock {
                name: name.to_string(),
                available: available_stock,
                requested: quantity,
            });
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine {
            medicine_id: medicine_id.to_string(),
            name: name.to_string(),
            unit_price_paise: unit_price.paise(),
            quantity,
            max_stock: available_stock,
        });
        Ok(())
    }

    /// Sets a line's quantity, clamping into `[1, max_stock]`.
    ///
    /// ## Behavior
    /// - Zero or negative requests clamp up to 1 (the stepper's minus
    ///   button bottoms out, it does not remove the line)
    /// - Requests above the stock snapshot clamp down to `max_stock`
    /// - Returns `Ok(false)` when the clamped value equals the current
    ///   quantity - a no-op, not an error
    ///
    /// ## Errors
    /// - `CoreError::LineNotFound` - the medicine has no line (stale view)
    pub fn update_quantity(&mut self, medicine_id: &str, quantity: i64) -> CoreResult<bool> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.medicine_id == medicine_id)
            .ok_or_else(|| CoreError::LineNotFound {
                medicine_id: medicine_id.to_string(),
            })?;

        let clamped = quantity.clamp(1, line.max_stock);
        if clamped == line.quantity {
            return Ok(false);
        }

        line.quantity = clamped;
        Ok(true)
    }

    /// Removes a line by medicine id. Absent ids are fine (idempotent).
    ///
    /// Returns whether a line was actually removed.
    pub fn remove_line(&mut self, medicine_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.medicine_id != medicine_id);
        self.lines.len() != before
    }

    /// Clears all lines. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the number of unique lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Calculates the subtotal (before tax).
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Calculates the bill summary for a given discount.
    ///
    /// Pure - never mutates the cart. The discount is applied as-is; the
    /// caller validates non-negativity before settlement.
    ///
    /// ```text
    /// subtotal = Σ line totals
    /// tax      = subtotal × 5%
    /// total    = subtotal + tax − discount
    /// ```
    pub fn totals(&self, discount: Money) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal.calculate_tax(TaxRate::from_bps(BILL_TAX_RATE_BPS));
        let total = subtotal + tax - discount;

        CartTotals {
            subtotal_paise: subtotal.paise(),
            tax_paise: tax.paise(),
            discount_paise: discount.paise(),
            total_paise: total.paise(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn add(cart: &mut Cart, id: &str, price: i64, qty: i64, stock: i64) -> CoreResult<()> {
        cart.add_line(id, &format!("Medicine {}", id), Money::from_paise(price), qty, stock)
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        add(&mut cart, "m1", 550, 10, 100).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 10);
        assert_eq!(cart.subtotal().paise(), 5500);
    }

    #[test]
    fn test_add_same_medicine_merges_line() {
        let mut cart = Cart::new();
        add(&mut cart, "m1", 550, 2, 100).unwrap();
        add(&mut cart, "m1", 550, 3, 100).unwrap();

        assert_eq!(cart.line_count(), 1); // still one unique line
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        assert!(matches!(
            add(&mut cart, "m1", 550, 0, 100),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            add(&mut cart, "m1", 550, -3, 100),
            Err(CoreError::Validation(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_beyond_stock_fails_and_preserves_cart() {
        let mut cart = Cart::new();
        add(&mut cart, "m1", 550, 3, 5).unwrap();

        // 3 already on the line; 3 more would exceed the 5-unit snapshot
        let err = add(&mut cart, "m1", 550, 3, 5).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            }
        ));

        // cart unchanged
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal().paise(), 1650);
    }

    #[test]
    fn test_fresh_line_beyond_stock_fails() {
        let mut cart = Cart::new();
        let err = add(&mut cart, "m1", 550, 6, 5).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_clamps_low() {
        let mut cart = Cart::new();
        add(&mut cart, "m1", 550, 3, 10).unwrap();

        // 0 and negative clamp to 1
        assert!(cart.update_quantity("m1", 0).unwrap());
        assert_eq!(cart.lines()[0].quantity, 1);

        assert!(!cart.update_quantity("m1", -5).unwrap()); // already 1 → no-op
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_clamps_high() {
        let mut cart = Cart::new();
        add(&mut cart, "m1", 550, 3, 10).unwrap();

        assert!(cart.update_quantity("m1", 25).unwrap());
        assert_eq!(cart.lines()[0].quantity, 10); // clamped to max_stock
    }

    #[test]
    fn test_update_quantity_noop_when_unchanged() {
        let mut cart = Cart::new();
        add(&mut cart, "m1", 550, 3, 10).unwrap();

        assert!(!cart.update_quantity("m1", 3).unwrap());
    }

    #[test]
    fn test_update_quantity_unknown_line() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.update_quantity("ghost", 2),
            Err(CoreError::LineNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_line_idempotent() {
        let mut cart = Cart::new();
        add(&mut cart, "m1", 550, 3, 10).unwrap();

        assert!(cart.remove_line("m1"));
        assert!(!cart.remove_line("m1")); // second removal: no error
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_idempotent() {
        let mut cart = Cart::new();
        add(&mut cart, "m1", 550, 3, 10).unwrap();

        cart.clear();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_example_from_receipt() {
        // One line: Paracetamol, ₹5.50 × 10
        let mut cart = Cart::new();
        cart.add_line("m1", "Paracetamol 500mg", Money::from_paise(550), 10, 100)
            .unwrap();

        let t = cart.totals(Money::zero());
        assert_eq!(t.subtotal_paise, 5500); // ₹55.00
        assert_eq!(t.tax_paise, 275); // ₹2.75
        assert_eq!(t.discount_paise, 0);
        assert_eq!(t.total_paise, 5775); // ₹57.75
    }

    #[test]
    fn test_totals_discount_can_exceed_subtotal() {
        // Existing behavior, deliberately preserved: a ₹100 discount on a
        // ₹57.75 bill produces a negative total.
        let mut cart = Cart::new();
        cart.add_line("m1", "Paracetamol 500mg", Money::from_paise(550), 10, 100)
            .unwrap();

        let t = cart.totals(Money::from_paise(10_000));
        assert_eq!(t.total_paise, -4225); // -₹42.25
    }

    #[test]
    fn test_subtotal_equals_sum_of_line_totals() {
        let mut cart = Cart::new();
        add(&mut cart, "m1", 550, 10, 100).unwrap();
        add(&mut cart, "m2", 875, 4, 50).unwrap();
        add(&mut cart, "m3", 1299, 2, 30).unwrap();

        let sum: i64 = cart.lines().iter().map(|l| l.line_total_paise()).sum();
        assert_eq!(cart.subtotal().paise(), sum);
        assert_eq!(sum, 5500 + 3500 + 2598);
    }

    #[test]
    fn test_line_total_is_price_times_quantity() {
        let mut cart = Cart::new();
        add(&mut cart, "m1", 875, 4, 50).unwrap();

        let line = &cart.lines()[0];
        assert_eq!(line.line_total_paise(), 875 * 4);
    }
}
