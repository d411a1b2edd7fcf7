//! # Domain Types
//!
//! Core domain types used throughout CarePOS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Medicine     │   │      Bill       │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  bill_number    │   │  name           │       │
//! │  │  name, company  │   │  items[]        │   │  phone?         │       │
//! │  │  price_paise    │   │  totals         │   └─────────────────┘       │
//! │  │  quantity       │   │  settled_at     │                             │
//! │  │  expiry_date    │   └─────────────────┘   ┌─────────────────┐       │
//! │  └─────────────────┘                         │    TaxRate      │       │
//! │                        ┌─────────────────┐   │  ─────────────  │       │
//! │                        │    BillItem     │   │  bps (u32)      │       │
//! │                        │  (frozen line)  │   │  500 = 5%       │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `Bill` is immutable once constructed: its items are frozen snapshots
//! of the cart lines at settlement time, so later price or name edits to
//! the inventory never rewrite sales history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = the flat 5% bill tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Medicine
// =============================================================================

/// A medicine record held by the inventory store.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Medicine {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the billing dropdown and on receipts.
    pub name: String,

    /// Manufacturer / marketing company.
    pub company: String,

    /// Unit price in paise (smallest currency unit). Always > 0.
    pub price_paise: i64,

    /// Units on hand. Never negative; a sale decrements it, a manual
    /// edit sets it.
    pub quantity: i64,

    /// Expiry date printed on the pack (calendar date, no time zone).
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,

    /// When the record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Total value of the units on hand (`price × quantity`).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price().multiply_quantity(self.quantity.max(0))
    }

    /// Checks whether `quantity` units can be sold from this record.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && self.quantity >= quantity
    }
}

// =============================================================================
// Customer
// =============================================================================

/// The customer a bill is issued to.
///
/// Walk-in sales are the norm; a blank name collapses to the walk-in
/// placeholder and a blank phone to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub name: String,
    pub phone: Option<String>,
}

/// Receipt name used when no customer name was entered.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

impl Customer {
    /// Builds a customer, normalizing blank input.
    pub fn new(name: &str, phone: Option<&str>) -> Self {
        let name = name.trim();
        let name = if name.is_empty() {
            WALK_IN_CUSTOMER.to_string()
        } else {
            name.to_string()
        };
        let phone = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        Customer { name, phone }
    }

    /// An anonymous walk-in customer.
    pub fn walk_in() -> Self {
        Customer {
            name: WALK_IN_CUSTOMER.to_string(),
            phone: None,
        }
    }
}

impl Default for Customer {
    fn default() -> Self {
        Customer::walk_in()
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A line on a settled bill.
/// Uses the snapshot pattern to freeze cart data at time of settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillItem {
    /// Inventory record this line was sold from.
    pub medicine_id: String,
    /// Medicine name at time of sale (frozen).
    pub name: String,
    /// Unit price in paise at time of sale (frozen).
    pub unit_price_paise: i64,
    /// Quantity sold.
    pub quantity: i64,
    /// Line total (unit_price × quantity).
    pub line_total_paise: i64,
}

impl BillItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise)
    }
}

/// An immutable, finalized record of a completed sale.
///
/// ## Invariants
/// - Constructed only by bill settlement; never mutated afterwards
/// - `total = subtotal + tax − discount`; the discount is NOT clamped to
///   the subtotal, so the total may be negative (preserved legacy
///   behavior, not a guard to add)
/// - `bill_number` is unique within the process lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    /// Timestamp-derived identifier, e.g. `BILL-1754438400123-0001`.
    pub bill_number: String,
    pub customer: Customer,
    pub items: Vec<BillItem>,
    pub subtotal_paise: i64,
    pub tax_paise: i64,
    pub discount_paise: i64,
    pub total_paise: i64,
    /// When settlement happened.
    #[ts(as = "String")]
    pub settled_at: DateTime<Utc>,
}

impl Bill {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }

    /// Returns the tax amount as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_paise(self.tax_paise)
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_paise(self.discount_paise)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }

    /// Total units sold on this bill.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
