//! # Error Types
//!
//! Domain-specific error types for carepos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  carepos-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  carepos-store errors (separate crate)                                  │
//! │  └── StoreError       - Store operation failures                        │
//! │                                                                         │
//! │  carepos-billing errors (separate crate)                                │
//! │  └── BillingError     - What the session caller sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → BillingError → caller message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store failures during settlement are deliberately NOT in this
//! hierarchy: they are soft, reported in the settlement result, and never
//! abort a sale.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (name, id, quantities)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They reject
/// synchronously, leave the cart unchanged, and should be translated to
/// user-facing messages by the caller.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity exceeds the available stock snapshot.
    ///
    /// ## When This Occurs
    /// - Adding more units than the stock captured for the line
    /// - Adding to an existing line so the merged quantity exceeds stock
    ///
    /// ## User Workflow
    /// ```text
    /// Add to bill (qty: 5)
    ///      │
    ///      ▼
    /// Check stock snapshot: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Aspirin 75mg", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 units available in stock"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Settlement was attempted on a cart with no lines.
    #[error("Cannot settle an empty cart")]
    EmptyCart,

    /// A cart operation referenced a medicine that has no line.
    #[error("No cart line for medicine {medicine_id}")]
    LineNotFound { medicine_id: String },

    /// Cart has exceeded maximum allowed unique lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., invalid UUID, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
