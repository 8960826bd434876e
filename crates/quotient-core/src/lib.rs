//! # quotient-core: Pure Pricing Domain for Quotient
//!
//! This crate is the **heart** of Quotient. It contains the pricing
//! calculation domain as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quotient Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             UI / PDF report rendering (out of scope)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ DTO contracts                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    quotient-engine                               │   │
//! │  │    CalculatePricingUseCase, ItemRepository port, EngineError     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quotient-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   money   │  │ percentage│  │ tier/row  │  │ calculator│   │   │
//! │  │   │  Money    │  │ Percentage│  │ schedules │  │  summary  │   │   │
//! │  │   │  Currency │  │  ratios   │  │ discounts │  │  buckets  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Currency-tagged Money with guarded arithmetic
//! - [`percentage`] - 0-100 ratio with discount/tax helpers
//! - [`category`] - Ordered grouping entity
//! - [`item`] - Priced, quantified catalog line
//! - [`tier`] - Tiered quantity/price resolution
//! - [`row`] - Per-row discount application and free-item override
//! - [`calculator`] - Aggregate pricing, discount/tax composition, analytics
//! - [`summary`] - One-time/monthly bucketing and the global discount
//! - [`validation`] - Field-named input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every calculation is deterministic - same input,
//!    same quote
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: All monetary values are `rust_decimal` decimals
//!    rounded to 2 places at construction (no floats)
//! 4. **Fail Closed**: Mixed currencies, negative money and >100% ratios
//!    are errors, never guesses
//!
//! ## Example Usage
//!
//! ```rust
//! use quotient_core::money::{Currency, Money};
//! use quotient_core::percentage::Percentage;
//! use rust_decimal_macros::dec;
//!
//! let subtotal = Money::from_cents(35_000, Currency::Eur).unwrap(); // €350
//! let discount = Percentage::new(dec!(20)).unwrap();
//!
//! // Tax applies AFTER the discount comes off.
//! let after = discount.calculate_remaining(&subtotal).unwrap();
//! let tax = Percentage::new(dec!(8.5)).unwrap().apply_to(&after).unwrap();
//! let total = after.add(&tax).unwrap();
//!
//! assert_eq!(total.to_cents(), 30_380); // €303.80
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod category;
pub mod error;
pub mod item;
pub mod money;
pub mod percentage;
pub mod row;
pub mod summary;
pub mod tier;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quotient_core::Money` instead of
// `use quotient_core::money::Money`

pub use calculator::{ItemPricing, PricingCalculationResult, PricingCalculator};
pub use category::Category;
pub use error::{CoreError, CoreResult, ValidationError};
pub use item::PricingItem;
pub use money::{Currency, Money};
pub use percentage::Percentage;
pub use row::{
    ChargeKind, DiscountApplication, DiscountKind, RowDiscount, RowPricing, RowTotals,
    SelectedItemRow,
};
pub use summary::{
    summarize, CategoryTotal, DiscountScope, GlobalDiscount, GlobalDiscountKind, QuoteSummary,
};
pub use tier::{PricingTier, TierSchedule};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when a calculation has no items to take a currency from.
///
/// ## Why a constant?
/// The quoting tool bills in a single home currency today; the data model
/// already carries per-amount currencies so this can become a per-tenant
/// setting without touching the calculators.
pub const DEFAULT_CURRENCY: Currency = Currency::Eur;

/// Maximum quantity of a single quote line.
///
/// ## Business Reason
/// Prevents accidental runaway multiplication (e.g., typing 100000
/// instead of 100). Quotes simply do not have lines this large.
pub const MAX_ITEM_QUANTITY: i64 = 10_000;

/// Maximum length of an entity identifier.
pub const MAX_ID_LENGTH: usize = 64;

/// Maximum length of a display name.
pub const MAX_NAME_LENGTH: usize = 200;
