//! # Billing Session
//!
//! One session = one view's working sale. The session owns the cart
//! outright - no globals, no shared mutable state - and goes through the
//! store handles for everything else.
//!
//! ## Session Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    BillingSession                                       │
//! │                                                                         │
//! │  UI action                  Session method            Effect            │
//! │  ─────────                  ──────────────            ──────            │
//! │  page load ───────────────► restore_cart()            resume saved cart │
//! │  pick medicine + qty ─────► add_item()                fetch, snapshot,  │
//! │                                                       merge into cart   │
//! │  quantity stepper ────────► update_quantity()         clamp to snapshot │
//! │  trash icon ──────────────► remove_item()             drop line         │
//! │  clear bill ──────────────► clear()                   empty cart +      │
//! │                                                       checkpoint        │
//! │  summary panel ───────────► totals()                  read-only math    │
//! │  process bill ────────────► settle()                  freeze bill,      │
//! │                                                       best-effort sync  │
//! │  dashboard load ──────────► dashboard()               aggregate         │
//! │                                                       snapshots         │
//! │                                                                         │
//! │  Every successful cart mutation checkpoints to the recovery store.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrent tabs each run their own session against the shared stores;
//! they reconcile by re-fetching on change events. Two sessions selling
//! the same units can over-sell - a known property of the optimistic
//! contract, reported through stale dashboards rather than prevented.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use carepos_core::billing::build_bill;
use carepos_core::stock::{sales_summary, summarize, SalesSummary, StockSummary};
use carepos_core::{Bill, Cart, CartTotals, Customer, Money};
use carepos_store::{
    BillHistoryStore, CartRecovery, ChangeEvent, ChangeNotifier, InventoryStore, StoreError,
};

use crate::error::BillingResult;
use crate::numbering::BillNumberGenerator;

// =============================================================================
// Settlement Report
// =============================================================================

/// Which write-out step a soft failure happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "stage")]
pub enum SettlementStage {
    /// `decrement_stock` for one line didn't land.
    StockSync { medicine_id: String },
    /// The history append didn't land.
    HistoryAppend,
}

/// A store call that failed AFTER the bill was finalized.
///
/// Recorded, logged, and returned - never thrown. The caller may retry
/// the sync out of band; the bill itself already stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftFailure {
    #[serde(flatten)]
    pub stage: SettlementStage,
    pub detail: String,
}

/// What `settle` hands back for receipt rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    /// The immutable bill - the source of truth for this sale.
    pub bill: Bill,
    /// Store calls that failed best-effort; empty on a clean settle.
    pub soft_failures: Vec<SoftFailure>,
}

impl SettlementReport {
    /// True when every write-out step landed.
    pub fn fully_synced(&self) -> bool {
        self.soft_failures.is_empty()
    }
}

// =============================================================================
// Dashboard Snapshot
// =============================================================================

/// Everything the dashboard view renders, assembled from one pass over
/// the stores.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stock: StockSummary,
    pub sales: SalesSummary,
    /// The five most recent bills, newest first.
    pub recent_bills: Vec<Bill>,
}

/// Recent-bills panel size.
const RECENT_BILLS_LIMIT: usize = 5;

// =============================================================================
// Billing Session
// =============================================================================

/// Owns one uncommitted sale and its collaborators.
pub struct BillingSession {
    cart: Cart,
    inventory: Arc<dyn InventoryStore>,
    history: Arc<dyn BillHistoryStore>,
    recovery: Arc<dyn CartRecovery>,
    notifier: ChangeNotifier,
    numbers: BillNumberGenerator,
}

impl BillingSession {
    /// Creates a session with an empty cart.
    pub fn new(
        inventory: Arc<dyn InventoryStore>,
        history: Arc<dyn BillHistoryStore>,
        recovery: Arc<dyn CartRecovery>,
        notifier: ChangeNotifier,
    ) -> Self {
        BillingSession {
            cart: Cart::new(),
            inventory,
            history,
            recovery,
            notifier,
            numbers: BillNumberGenerator::new(),
        }
    }

    /// Resumes a checkpointed cart from a previous run, if any.
    ///
    /// Returns whether a non-empty cart was restored.
    pub fn restore_cart(&mut self) -> bool {
        match self.recovery.load() {
            Some(saved) if !saved.is_empty() => {
                info!(lines = saved.line_count(), "Restored saved cart");
                self.cart = saved;
                true
            }
            _ => false,
        }
    }

    /// Read access to the working cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds `quantity` units of a medicine to the cart.
    ///
    /// Fetches the record, snapshots its current stock, and delegates the
    /// merge/stock rules to the cart engine. Checkpoints on success.
    ///
    /// ## Errors
    /// - `BillingError::Store` - unknown medicine or store failure
    /// - `BillingError::Core` - invalid quantity or insufficient stock
    pub async fn add_item(&mut self, medicine_id: &str, quantity: i64) -> BillingResult<()> {
        let medicine = self
            .inventory
            .get(medicine_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Medicine", medicine_id))?;

        self.cart.add_line(
            &medicine.id,
            &medicine.name,
            medicine.price(),
            quantity,
            medicine.quantity,
        )?;

        debug!(medicine = %medicine.name, quantity, "Added to cart");
        self.recovery.save(&self.cart);
        Ok(())
    }

    /// Sets a line's quantity, clamped to `[1, stock snapshot]`.
    ///
    /// Returns whether the cart changed; checkpoints only when it did.
    pub fn update_quantity(&mut self, medicine_id: &str, quantity: i64) -> BillingResult<bool> {
        let changed = self.cart.update_quantity(medicine_id, quantity)?;
        if changed {
            self.recovery.save(&self.cart);
        }
        Ok(changed)
    }

    /// Removes a line. Absent ids are fine (idempotent).
    pub fn remove_item(&mut self, medicine_id: &str) -> bool {
        let removed = self.cart.remove_line(medicine_id);
        if removed {
            self.recovery.save(&self.cart);
        }
        removed
    }

    /// Empties the cart and drops the checkpoint. Idempotent.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.recovery.clear();
    }

    /// Bill summary for the current cart and a display discount.
    pub fn totals(&self, discount: Money) -> CartTotals {
        self.cart.totals(discount)
    }

    /// Freezes the cart into a bill and writes it out best-effort.
    ///
    /// See the crate-level settlement diagram. The only hard errors are
    /// the empty-cart precondition and a negative discount; every store
    /// failure after the bill is built is soft.
    pub async fn settle(
        &mut self,
        customer: Customer,
        discount: Money,
    ) -> BillingResult<SettlementReport> {
        let now = Utc::now();
        let bill_number = self.numbers.next(now);
        let bill = build_bill(&self.cart, customer, discount, bill_number, now)?;

        let mut soft_failures = Vec::new();

        // Best-effort stock sync: the bill already stands, so a failed
        // decrement is reported, not raised.
        for item in &bill.items {
            if let Err(err) = self
                .inventory
                .decrement_stock(&item.medicine_id, item.quantity)
                .await
            {
                warn!(
                    medicine_id = %item.medicine_id,
                    error = %err,
                    "Stock decrement failed; bill stands"
                );
                soft_failures.push(SoftFailure {
                    stage: SettlementStage::StockSync {
                        medicine_id: item.medicine_id.clone(),
                    },
                    detail: err.to_string(),
                });
            }
        }

        if let Err(err) = self.history.append(bill.clone()).await {
            warn!(error = %err, "Bill history append failed; bill stands");
            soft_failures.push(SoftFailure {
                stage: SettlementStage::HistoryAppend,
                detail: err.to_string(),
            });
        }

        self.cart.clear();
        self.recovery.clear();

        self.notifier.publish(ChangeEvent::BillSettled);
        self.notifier.publish(ChangeEvent::InventoryChanged);

        info!(
            bill_number = %bill.bill_number,
            total = %bill.total(),
            items = bill.items.len(),
            soft_failures = soft_failures.len(),
            "Bill settled"
        );

        Ok(SettlementReport {
            bill,
            soft_failures,
        })
    }

    /// Assembles the dashboard from fresh store snapshots.
    ///
    /// `today` is a parameter (not read from the clock) so day-boundary
    /// behavior stays testable.
    pub async fn dashboard(&self, today: NaiveDate) -> BillingResult<DashboardSnapshot> {
        let medicines = self.inventory.list().await?;
        let bills = self.history.all().await?;
        let recent_bills = self.history.recent(RECENT_BILLS_LIMIT).await?;

        Ok(DashboardSnapshot {
            stock: summarize(&medicines, today),
            sales: sales_summary(&bills, today),
            recent_bills,
        })
    }

    /// A handle to the change bus, for wiring subscriber views.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}
