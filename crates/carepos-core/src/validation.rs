//! # Validation Module
//!
//! Input validation utilities for CarePOS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form (HTML attributes, inline checks)                 │
//! │  ├── Basic format checks (empty, min/max)                               │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                            │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── Business rule validation                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart/store invariants                                         │
//! │  └── Stock checks, uniqueness by medicine id                            │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use carepos_core::validation::{validate_medicine_name, validate_cart_quantity};
//!
//! validate_medicine_name("Paracetamol 500mg").unwrap();
//! validate_cart_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a medicine name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_medicine_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a company/manufacturer name.
///
/// Same shape rules as the medicine name.
pub fn validate_company(company: &str) -> ValidationResult<()> {
    let company = company.trim();

    if company.is_empty() {
        return Err(ValidationError::Required {
            field: "company".to_string(),
        });
    }

    if company.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "company".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity entering the cart.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// Stock ceiling checks are NOT here - they belong to the cart, which
/// holds the per-line stock snapshot.
pub fn validate_cart_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the initial quantity of a new medicine record.
///
/// ## Rules
/// - Must be positive (> 0) - the add-medicine form rejects zero-stock
///   records; stock only reaches zero through sales
pub fn validate_initial_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price in paise.
///
/// ## Rules
/// - Must be strictly positive; there are no free medicines
///
/// ## Example
/// ```rust
/// use carepos_core::validation::validate_price_paise;
///
/// assert!(validate_price_paise(550).is_ok());   // ₹5.50
/// assert!(validate_price_paise(0).is_err());
/// assert!(validate_price_paise(-100).is_err());
/// ```
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a bill discount in paise.
///
/// ## Rules
/// - Must be zero or greater
/// - NOT compared against the subtotal: an over-subtotal discount is
///   legal and yields a negative bill total
pub fn validate_discount_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "discount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use carepos_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
