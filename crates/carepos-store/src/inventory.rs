//! # Inventory Store
//!
//! The medicine-records contract and its in-memory backend.
//!
//! ## Key Operations
//! - CRUD on medicine records
//! - Best-effort stock decrement during settlement
//!
//! ## Decrement Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Decrement Contract                             │
//! │                                                                         │
//! │  Settlement sends one decrement per bill line, AFTER the bill is        │
//! │  final. The bill is the source of truth for what was sold:              │
//! │                                                                         │
//! │    decrement fails  → bill stands, failure reported, stock stale        │
//! │    decrement lands  → quantity = max(0, quantity − qty)                 │
//! │                                                                         │
//! │  The floor at zero keeps the `quantity >= 0` record invariant even      │
//! │  when another view sold the same units first. Concurrent sales can      │
//! │  therefore over-sell; views reconcile by re-fetching on change          │
//! │  events, not by locking.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use carepos_core::validation::{
    validate_company, validate_initial_quantity, validate_medicine_name, validate_price_paise,
};
use carepos_core::Medicine;

// =============================================================================
// Input Shapes
// =============================================================================

/// Input for creating a medicine record (the add-medicine form).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    pub name: String,
    pub company: String,
    pub price_paise: i64,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
}

/// Partial update for a medicine record (the edit form).
///
/// `None` fields are left untouched. Manual edits SET the quantity;
/// sales go through `decrement_stock` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub price_paise: Option<i64>,
    pub quantity: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
}

// =============================================================================
// Store Contract
// =============================================================================

/// The inventory store the billing engine consumes.
///
/// Implementations must keep insertion order in `list` - the dashboard
/// uses it to break `created_at` ties in the "recently added" panel.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Snapshot of all medicine records, in insertion order.
    async fn list(&self) -> StoreResult<Vec<Medicine>>;

    /// Fetches a single record.
    async fn get(&self, id: &str) -> StoreResult<Option<Medicine>>;

    /// Creates a record from validated form input.
    async fn create(&self, input: NewMedicine) -> StoreResult<Medicine>;

    /// Applies a partial update to a record.
    async fn update(&self, id: &str, update: MedicineUpdate) -> StoreResult<Medicine>;

    /// Removes a record.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Decrements stock after a sale, flooring at zero.
    ///
    /// Best-effort from the caller's perspective: settlement reports a
    /// failure here instead of aborting.
    async fn decrement_stock(&self, id: &str, qty: i64) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// Vec-backed inventory for tests and the demo.
///
/// ## Why a Vec, not a HashMap?
/// The record count is small and `list` must preserve insertion order;
/// linear scans are fine and keep the implementation obvious.
#[derive(Debug, Default)]
pub struct MemoryInventory {
    rows: RwLock<Vec<Medicine>>,
}

impl MemoryInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory pre-populated with records (test fixtures).
    pub fn with_records(records: Vec<Medicine>) -> Self {
        MemoryInventory {
            rows: RwLock::new(records),
        }
    }
}

fn validate_new(input: &NewMedicine) -> StoreResult<()> {
    validate_medicine_name(&input.name)?;
    validate_company(&input.company)?;
    validate_price_paise(input.price_paise)?;
    validate_initial_quantity(input.quantity)?;
    Ok(())
}

#[async_trait]
impl InventoryStore for MemoryInventory {
    async fn list(&self) -> StoreResult<Vec<Medicine>> {
        Ok(self.rows.read().await.clone())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Medicine>> {
        Ok(self.rows.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, input: NewMedicine) -> StoreResult<Medicine> {
        validate_new(&input)?;

        let now = Utc::now();
        let medicine = Medicine {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            company: input.company.trim().to_string(),
            price_paise: input.price_paise,
            quantity: input.quantity,
            expiry_date: input.expiry_date,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %medicine.id, name = %medicine.name, "Creating medicine");
        self.rows.write().await.push(medicine.clone());
        Ok(medicine)
    }

    async fn update(&self, id: &str, update: MedicineUpdate) -> StoreResult<Medicine> {
        let mut rows = self.rows.write().await;
        let medicine = rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("Medicine", id))?;

        if let Some(name) = update.name {
            validate_medicine_name(&name)?;
            medicine.name = name.trim().to_string();
        }
        if let Some(company) = update.company {
            validate_company(&company)?;
            medicine.company = company.trim().to_string();
        }
        if let Some(price) = update.price_paise {
            validate_price_paise(price)?;
            medicine.price_paise = price;
        }
        if let Some(quantity) = update.quantity {
            // Manual edits may zero a record out, but never go negative
            if quantity < 0 {
                return Err(carepos_core::ValidationError::MustBeNonNegative {
                    field: "quantity".to_string(),
                }
                .into());
            }
            medicine.quantity = quantity;
        }
        if let Some(expiry) = update.expiry_date {
            medicine.expiry_date = expiry;
        }
        medicine.updated_at = Utc::now();

        debug!(id = %id, "Updated medicine");
        Ok(medicine.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|m| m.id != id);

        if rows.len() == before {
            return Err(StoreError::not_found("Medicine", id));
        }

        debug!(id = %id, "Deleted medicine");
        Ok(())
    }

    async fn decrement_stock(&self, id: &str, qty: i64) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        let medicine = rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("Medicine", id))?;

        medicine.quantity = (medicine.quantity - qty).max(0);
        medicine.updated_at = Utc::now();

        debug!(id = %id, qty = %qty, remaining = %medicine.quantity, "Decremented stock");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
