//! # Error Types
//!
//! Domain-specific error types for quotient-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quotient-core errors (this file)                                      │
//! │  ├── CoreError        - Value object / calculation failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quotient-engine errors (separate crate)                               │
//! │  ├── RepositoryError  - Item storage failures                          │
//! │  └── EngineError      - What the UI layer sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EngineError → UI                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (currency, field, bounds)
//! 3. Errors are enum variants, never String
//! 4. Illegal states fail at construction, not downstream

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Pricing domain errors.
///
/// These errors represent illegal value-object states or calculation rule
/// violations. They fail closed: a calculation that would produce a
/// meaningless number (mixed currencies, negative money, >100% discount)
/// errors instead of guessing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Two monetary values with different currencies were combined.
    ///
    /// ## When This Occurs
    /// - Adding/subtracting/comparing EUR against USD
    /// - A quote mixing items priced in different currencies
    ///
    /// There is no exchange-rate guessing: the operation is refused.
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    /// An operation would produce a negative monetary amount.
    ///
    /// Money is never negative in this domain; shortfalls are clamped to
    /// zero only where a rule explicitly says so (row totals, bucket
    /// finals). At the value-object layer going negative is an error.
    #[error("monetary amount cannot go negative: {amount}")]
    NegativeAmount { amount: String },

    /// A multiplication factor was negative.
    #[error("multiplication factor must be >= 0, got {factor}")]
    InvalidFactor { factor: String },

    /// A division factor was zero or negative.
    #[error("division factor must be > 0, got {factor}")]
    DivisionByZero { factor: String },

    /// A currency code outside the supported allow-list.
    #[error("unsupported currency: {code}")]
    UnsupportedCurrency { code: String },

    /// A percentage outside the closed [0, 100] range.
    ///
    /// Raised both at construction and when `add`/`subtract` would leave
    /// the range.
    #[error("percentage must be between 0 and 100, got {value}")]
    PercentageOutOfRange { value: String },

    /// Denominator of zero passed to `Percentage::from_fraction`.
    #[error("cannot build a percentage from a zero denominator")]
    ZeroDenominator,

    /// A tier schedule that is empty, unordered or overlapping.
    #[error("invalid tier schedule: {reason}")]
    InvalidTierSchedule { reason: String },

    /// Break-even analysis where the unit price does not exceed the
    /// variable cost per unit; there is no break-even point.
    #[error("unit price {price} does not exceed variable cost {variable_cost}")]
    UnprofitablePrice {
        price: String,
        variable_cost: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Field-named so the UI layer can highlight the offending form control.
/// Raised before any business logic runs and surfaced verbatim, never
/// wrapped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., blank discount code, fractional quantity).
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
