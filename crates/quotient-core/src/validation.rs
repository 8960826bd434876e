//! # Validation Module
//!
//! Input validation utilities for the pricing core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI forms (out of scope)                                      │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Use case (quotient-engine)                                   │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: field-level rule validation                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Value object constructors                                    │
//! │  └── Money/Percentage/Tier invariants                                  │
//! │                                                                         │
//! │  Defense in depth: each layer catches a different class of error       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator names the field it rejects so forms can highlight the
//! offending control.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::{MAX_ID_LENGTH, MAX_ITEM_QUANTITY, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an identifier field: non-blank, bounded length.
pub fn validate_identifier(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LENGTH,
        });
    }

    Ok(())
}

/// Validates a display-name field: non-blank, bounded length.
pub fn validate_display_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a pricing item id.
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    validate_identifier("id", id)
}

/// Validates a pricing item name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_display_name("name", name)
}

/// Validates a discount code: if a code is given at all it must not be
/// blank. Absence is fine - the caller models that with `Option`.
pub fn validate_discount_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::InvalidFormat {
            field: "discountCode".to_string(),
            reason: "must not be blank".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (10,000) - guards against runaway
///   multiplication from a typo like 100000
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a tax rate percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
pub fn validate_tax_rate(rate: Decimal) -> ValidationResult<()> {
    if rate.is_sign_negative() || rate > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "taxRate".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
