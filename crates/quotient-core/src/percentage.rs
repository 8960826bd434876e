//! # Percentage Module
//!
//! A ratio value object bounded to the closed range [0, 100].
//!
//! Used in two semantically distinct roles that share the same math:
//! - **discount ratio** - how much comes off an amount
//! - **tax ratio** - how much goes on top of an amount
//!
//! Like [`Money`](crate::money::Money), the value is rounded to 2 decimal
//! places at construction and every transforming method returns a new
//! instance. Composing percentages by `add` must not exceed 100 and
//! `subtract` must not go below 0 - both are errors, not clamps.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Percentage Type
// =============================================================================

/// An immutable percentage in [0, 100], rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage {
    value: Decimal,
}

impl Percentage {
    /// Creates a percentage, rounding to 2 decimal places.
    ///
    /// ## Errors
    /// [`CoreError::PercentageOutOfRange`] for values below 0 or above 100.
    pub fn new(value: Decimal) -> CoreResult<Self> {
        if value.is_sign_negative() || value > Decimal::ONE_HUNDRED {
            return Err(CoreError::PercentageOutOfRange {
                value: value.to_string(),
            });
        }
        Ok(Percentage {
            value: value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        })
    }

    /// 0%.
    pub const fn zero() -> Self {
        Percentage {
            value: Decimal::ZERO,
        }
    }

    /// 100%.
    pub const fn full() -> Self {
        Percentage {
            value: Decimal::ONE_HUNDRED,
        }
    }

    /// Builds from a fraction in [0, 1], e.g. `0.25` → 25%.
    pub fn from_decimal(fraction: Decimal) -> CoreResult<Self> {
        Percentage::new(fraction * Decimal::ONE_HUNDRED)
    }

    /// Builds from a numerator/denominator pair, e.g. `(1, 4)` → 25%.
    ///
    /// ## Errors
    /// [`CoreError::ZeroDenominator`] when `denominator` is zero.
    pub fn from_fraction(numerator: Decimal, denominator: Decimal) -> CoreResult<Self> {
        if denominator.is_zero() {
            return Err(CoreError::ZeroDenominator);
        }
        Percentage::new(numerator / denominator * Decimal::ONE_HUNDRED)
    }

    /// Returns the percentage value (0-100).
    pub const fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the ratio as a fraction in [0, 1], e.g. 25% → `0.25`.
    pub fn to_decimal(&self) -> Decimal {
        self.value / Decimal::ONE_HUNDRED
    }

    /// Applies the ratio to an amount: `amount × value / 100`.
    pub fn apply_to(&self, amount: &Money) -> CoreResult<Money> {
        amount.multiply(self.to_decimal())
    }

    /// The discount this percentage takes off an amount.
    ///
    /// Same math as [`apply_to`](Self::apply_to); named separately because
    /// call sites read better as "what comes off" vs "what it maps to".
    pub fn calculate_discount(&self, amount: &Money) -> CoreResult<Money> {
        self.apply_to(amount)
    }

    /// What remains of an amount after this percentage is taken off.
    ///
    /// Cannot go negative: the discount is at most 100% of the amount.
    pub fn calculate_remaining(&self, amount: &Money) -> CoreResult<Money> {
        let discount = self.calculate_discount(amount)?;
        amount.subtract_or_zero(&discount)
    }

    /// Adds two percentages; the sum must stay within 100.
    pub fn add(&self, other: &Percentage) -> CoreResult<Percentage> {
        Percentage::new(self.value + other.value)
    }

    /// Subtracts a percentage; the result must stay at or above 0.
    pub fn subtract(&self, other: &Percentage) -> CoreResult<Percentage> {
        Percentage::new(self.value - other.value)
    }

    /// Checks for 0%.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Checks for 100%.
    pub fn is_full(&self) -> bool {
        self.value == Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
