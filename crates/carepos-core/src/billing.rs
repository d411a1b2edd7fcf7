//! # Bill Construction
//!
//! The pure half of bill settlement: freezing a cart plus a discount into
//! an immutable [`Bill`].
//!
//! ## Settlement Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Where Settlement Lives                                │
//! │                                                                         │
//! │  carepos-core::billing (THIS MODULE)     carepos-billing::session       │
//! │  ───────────────────────────────────     ─────────────────────────      │
//! │  • empty-cart precondition               • bill number generation       │
//! │  • discount validation                   • stock decrement (soft)       │
//! │  • totals computation                    • history append (soft)        │
//! │  • Bill construction                     • change notification          │
//! │                                          • cart + recovery clear        │
//! │                                                                         │
//! │  Deterministic, no clock, no I/O         Async, best-effort I/O         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The bill number and timestamp are inputs here so this function stays
//! replayable in tests.

use chrono::{DateTime, Utc};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Bill, BillItem, Customer};
use crate::validation::validate_discount_paise;

/// Freezes a cart into an immutable bill.
///
/// ## Algorithm
/// 1. Reject an empty cart (`CoreError::EmptyCart`)
/// 2. Reject a negative discount (`CoreError::Validation`)
/// 3. `subtotal = Σ line totals`, `tax = subtotal × 5%`,
///    `total = subtotal + tax − discount`
/// 4. Snapshot every line into a [`BillItem`]
///
/// The discount is NOT clamped to the subtotal; a larger discount yields
/// a negative total. That matches the deployed behavior and is covered by
/// tests rather than "fixed" here.
///
/// ## Errors
/// - `CoreError::EmptyCart` - nothing to settle
/// - `CoreError::Validation` - negative discount
pub fn build_bill(
    cart: &Cart,
    customer: Customer,
    discount: Money,
    bill_number: String,
    settled_at: DateTime<Utc>,
) -> CoreResult<Bill> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    validate_discount_paise(discount.paise())?;

    let totals = cart.totals(discount);

    let items = cart
        .lines()
        .iter()
        .map(|line| BillItem {
            medicine_id: line.medicine_id.clone(),
            name: line.name.clone(),
            unit_price_paise: line.unit_price_paise,
            quantity: line.quantity,
            line_total_paise: line.line_total_paise(),
        })
        .collect();

    Ok(Bill {
        bill_number,
        customer,
        items,
        subtotal_paise: totals.subtotal_paise,
        tax_paise: totals.tax_paise,
        discount_paise: totals.discount_paise,
        total_paise: totals.total_paise,
        settled_at,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_line("m1", "Paracetamol 500mg", Money::from_paise(550), 10, 100)
            .unwrap();
        cart
    }

    fn at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-06T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_build_bill_totals() {
        let cart = sample_cart();
        let bill = build_bill(
            &cart,
            Customer::walk_in(),
            Money::zero(),
            "BILL-1-0001".into(),
            at(),
        )
        .unwrap();

        assert_eq!(bill.subtotal_paise, 5500);
        assert_eq!(bill.tax_paise, 275);
        assert_eq!(bill.discount_paise, 0);
        assert_eq!(bill.total_paise, 5775);
        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.items[0].line_total_paise, 5500);
        assert_eq!(bill.total_quantity(), 10);
    }

    #[test]
    fn test_build_bill_negative_total_allowed() {
        let cart = sample_cart();
        let bill = build_bill(
            &cart,
            Customer::walk_in(),
            Money::from_paise(10_000), // ₹100 discount on a ₹57.75 bill
            "BILL-1-0002".into(),
            at(),
        )
        .unwrap();

        assert_eq!(bill.total_paise, -4225);
    }

    #[test]
    fn test_build_bill_empty_cart_rejected() {
        let cart = Cart::new();
        let err = build_bill(
            &cart,
            Customer::walk_in(),
            Money::zero(),
            "BILL-1-0003".into(),
            at(),
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_build_bill_negative_discount_rejected() {
        let cart = sample_cart();
        let err = build_bill(
            &cart,
            Customer::walk_in(),
            Money::from_paise(-1),
            "BILL-1-0004".into(),
            at(),
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_bill_items_are_frozen_snapshots() {
        let mut cart = Cart::new();
        cart.add_line("m1", "Cetirizine 10mg", Money::from_paise(875), 4, 50)
            .unwrap();
        let bill = build_bill(
            &cart,
            Customer::new("Asha Rao", None),
            Money::zero(),
            "BILL-1-0005".into(),
            at(),
        )
        .unwrap();

        // Mutating the cart afterwards must not affect the bill
        cart.clear();
        assert_eq!(bill.items[0].name, "Cetirizine 10mg");
        assert_eq!(bill.items[0].quantity, 4);
        assert_eq!(bill.customer.name, "Asha Rao");
    }
}
