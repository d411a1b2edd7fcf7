//! # carepos-store: Store Layer for CarePOS
//!
//! This crate defines the store contracts the billing engine depends on
//! and ships in-memory implementations of each.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CarePOS Data Flow                                │
//! │                                                                         │
//! │  BillingSession (settle, dashboard)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   carepos-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐  ┌─────────────────┐  ┌────────────────┐  │   │
//! │  │   │ InventoryStore │  │ BillHistoryStore│  │ CartRecovery   │  │   │
//! │  │   │ (inventory.rs) │  │ (history.rs)    │  │ (recovery.rs)  │  │   │
//! │  │   │                │  │                 │  │                │  │   │
//! │  │   │ list/create/   │  │ append + evict  │  │ save/load/     │  │   │
//! │  │   │ update/delete/ │  │ beyond 50       │  │ clear the      │  │   │
//! │  │   │ decrement      │  │ newest-first    │  │ working cart   │  │   │
//! │  │   └────────────────┘  └─────────────────┘  └────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────────────────────────────────────────┐   │   │
//! │  │   │ ChangeNotifier (notify.rs)                             │   │   │
//! │  │   │ fire-and-forget "data changed, re-fetch" broadcast     │   │   │
//! │  │   └────────────────────────────────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  In-memory backends (tests, demo) - a real database would sit behind    │
//! │  the same traits                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`error`] - Store error types
//! - [`inventory`] - Medicine records: CRUD + best-effort stock decrement
//! - [`history`] - Settled bills, capped to the most recent 50
//! - [`recovery`] - Cart checkpoints so a reload resumes an open sale
//! - [`notify`] - Cross-view change events

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod history;
pub mod inventory;
pub mod notify;
pub mod recovery;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use history::{BillHistoryStore, MemoryBillHistory};
pub use inventory::{InventoryStore, MedicineUpdate, MemoryInventory, NewMedicine};
pub use notify::{ChangeEvent, ChangeNotifier};
pub use recovery::{CartRecovery, MemoryCartRecovery};
