//! # Billing Error Type
//!
//! What session callers see when an operation is rejected outright.
//!
//! Soft failures are deliberately absent here: a store error during the
//! settlement write-out is DATA on the [`crate::SettlementReport`], not
//! an error, because the bill stands regardless.

use thiserror::Error;

use carepos_core::CoreError;
use carepos_store::StoreError;

/// Hard failures from billing session operations.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Business rule violation (empty cart, stock exceeded, bad input).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store call the operation cannot proceed without (fetching the
    /// medicine for add_item, snapshots for the dashboard).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for billing session operations.
pub type BillingResult<T> = Result<T, BillingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_converts() {
        let err: BillingError = CoreError::EmptyCart.into();
        assert_eq!(err.to_string(), "Cannot settle an empty cart");
    }

    #[test]
    fn test_store_error_converts() {
        let err: BillingError = StoreError::not_found("Medicine", "m1").into();
        assert_eq!(err.to_string(), "Medicine not found: m1");
    }
}
