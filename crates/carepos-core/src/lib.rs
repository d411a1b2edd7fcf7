//! # carepos-core: Pure Business Logic for CarePOS
//!
//! This crate is the **heart** of CarePOS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CarePOS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Views                                │   │
//! │  │    Billing UI ──► Cart Table ──► Receipt ──► Dashboard          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               carepos-billing (session layer)                   │   │
//! │  │    add_item, update_quantity, settle, dashboard                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ carepos-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   stock   │   │   │
//! │  │   │ Medicine  │  │   Money   │  │   Cart    │  │ classify  │   │   │
//! │  │   │   Bill    │  │  TaxCalc  │  │ CartLine  │  │ summarize │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE • NO CLOCK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    carepos-store (Store Layer)                  │   │
//! │  │            inventory, bill history, change notifications        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, Bill, Customer, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`cart`] - The cart engine for the current, uncommitted sale
//! - [`billing`] - Freezing a cart into an immutable bill
//! - [`stock`] - Stock/expiry classification and dashboard aggregation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Store, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **No Clock**: "now" and "today" are always passed in by the caller
//!
//! ## Example Usage
//!
//! ```rust
//! use carepos_core::money::Money;
//! use carepos_core::types::TaxRate;
//! use carepos_core::BILL_TAX_RATE_BPS;
//!
//! // Create money from paise (never from floats!)
//! let subtotal = Money::from_paise(5500); // ₹55.00
//!
//! // Bill tax is a flat 5%
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(BILL_TAX_RATE_BPS));
//! assert_eq!(tax.paise(), 275); // ₹2.75
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod cart;
pub mod error;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use carepos_core::Money` instead of
// `use carepos_core::money::Money`

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use stock::{StockBand, StockStatus, StockSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat bill tax rate in basis points (500 = 5%).
///
/// ## Business Reason
/// Every bill applies a single flat 5% tax on the subtotal. There is no
/// per-item or tiered taxation.
pub const BILL_TAX_RATE_BPS: u32 = 500;

/// Quantity below which a medicine counts as low stock.
///
/// A medicine with `1..=9` units on hand is low stock; `<= 0` is out of
/// stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Days-to-expiry window (inclusive) for the expiring-soon alert.
pub const EXPIRY_SOON_DAYS: i64 = 30;

/// Maximum unique lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_LINES: usize = 100;

/// How many settled bills the history retains (oldest evicted first).
pub const BILL_HISTORY_CAP: usize = 50;

/// How many records the dashboard "recently added" panel shows.
pub const RECENT_MEDICINES_LIMIT: usize = 5;
