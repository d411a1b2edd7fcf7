//! # carepos-billing: Billing Engine for CarePOS
//!
//! Orchestrates one sale: a [`session::BillingSession`] owns the working
//! cart, talks to the inventory and bill-history stores, checkpoints the
//! cart for crash recovery, and broadcasts change events after
//! settlement.
//!
//! ## Settlement at a Glance
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  settle(customer, discount)                                             │
//! │                                                                         │
//! │  1. empty cart?  ──────────────► EmptyCart error, nothing touched       │
//! │  2. build immutable Bill (subtotal, 5% tax, discount, total)            │
//! │  3. decrement stock per line ──► failures are SOFT, bill stands         │
//! │  4. append bill to history   ──► failure is SOFT too                    │
//! │  5. clear cart + recovery checkpoint                                    │
//! │  6. publish BillSettled + InventoryChanged                              │
//! │  7. return SettlementReport { bill, soft_failures }                     │
//! │                                                                         │
//! │  The bill is the source of truth for what was sold, even when the       │
//! │  stock sync never lands. At-most-once, no rollback, no retry here.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod numbering;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{BillingError, BillingResult};
pub use numbering::BillNumberGenerator;
pub use session::{BillingSession, DashboardSnapshot, SettlementReport, SettlementStage, SoftFailure};
