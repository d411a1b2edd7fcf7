//! # Store Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Backend failure (memory store: injected; real store: I/O)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds entity/id context                      │
//! │       │                                                                 │
//! │       ├── during add_item/dashboard → hard BillingError::Store          │
//! │       │                                                                 │
//! │       └── during settlement → SOFT: recorded on the settlement          │
//! │           report, logged at warn, never aborts the sale                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use carepos_core::ValidationError;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    ///
    /// ## When This Occurs
    /// - Medicine id doesn't exist (deleted in another view)
    /// - Decrement targeted at a removed record
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Input to create/update failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The backend could not serve the request.
    ///
    /// In-memory stores only produce this when a test injects it; a real
    /// backend maps connection and timeout failures here.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
