//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal + a single rounding point                   │
//! │    Every Money is rounded to 2 decimal places AT CREATION.              │
//! │    Intermediate results are Money values too, so they are re-rounded    │
//! │    at each step and no drift accumulates across chained operations.     │
//! │                                                                         │
//! │  This is half-up rounding, not banker's rounding - kept deliberately    │
//! │  so totals match the rest of the quoting pipeline to the cent.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Currency Safety
//! Every amount is tagged with its currency. Arithmetic between two `Money`
//! values with different currencies is a hard error, never a silent
//! coercion - the system refuses to guess exchange rates.
//!
//! ## Usage
//! ```rust
//! use quotient_core::money::{Currency, Money};
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_cents(1099, Currency::Eur).unwrap(); // €10.99
//! let doubled = price.multiply(Decimal::TWO).unwrap();         // €21.98
//! assert_eq!(doubled.to_cents(), 2198);
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Monetary values carry exactly two decimal places.
const MONEY_SCALE: u32 = 2;

// =============================================================================
// Currency
// =============================================================================

/// ISO 4217 currency codes supported by the system.
///
/// ## Why an Allow-List?
/// The quoting tool only issues quotes in currencies the business actually
/// bills in. Restricting the set at the type level means an unsupported
/// code fails at the boundary, not deep inside a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro
    Eur,
    /// US Dollar
    Usd,
    /// British Pound
    Gbp,
    /// Swiss Franc
    Chf,
}

impl Currency {
    /// Returns the ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
        }
    }

    /// Returns the display symbol used by `Money::format`.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
            Currency::Chf => "CHF ",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "GBP" => Ok(Currency::Gbp),
            "CHF" => Ok(Currency::Chf),
            other => Err(CoreError::UnsupportedCurrency {
                code: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// An immutable, currency-tagged monetary amount.
///
/// ## Invariants
/// - `amount >= 0` always. Shortfalls are represented by clamping to zero
///   at the rule layer, never by negative money.
/// - `amount` is rounded to 2 decimal places at construction. This is the
///   single rounding point in the system.
/// - Binary operations require identical currencies or fail with
///   [`CoreError::CurrencyMismatch`].
///
/// ## Lifecycle
/// Constructed fresh on every operation - there is no mutation. Every
/// arithmetic method returns a new instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a Money value, rounding to 2 decimal places.
    ///
    /// ## Errors
    /// Returns [`CoreError::NegativeAmount`] for negative input - negative
    /// money does not exist in this domain.
    ///
    /// ## Example
    /// ```rust
    /// use quotient_core::money::{Currency, Money};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let m = Money::new(Decimal::from_str("100.123456").unwrap(), Currency::Eur).unwrap();
    /// assert_eq!(m.to_cents(), 10012); // rounded at creation
    /// ```
    pub fn new(amount: Decimal, currency: Currency) -> CoreResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(CoreError::NegativeAmount {
                amount: amount.to_string(),
            });
        }
        Ok(Money {
            amount: Self::round(amount),
            currency,
        })
    }

    /// Returns zero in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Money {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Creates a Money value from cents (the smallest currency unit).
    pub fn from_cents(cents: i64, currency: Currency) -> CoreResult<Self> {
        Self::new(Decimal::new(cents, MONEY_SCALE), currency)
    }

    /// Returns the value in cents.
    ///
    /// Exact by construction: the amount always carries two decimal places.
    pub fn to_cents(&self) -> i64 {
        (self.amount * Decimal::ONE_HUNDRED)
            .round()
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    /// Returns the decimal amount (always rounded to 2 places).
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency tag.
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Checks if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Adds another amount of the same currency.
    pub fn add(&self, other: &Money) -> CoreResult<Money> {
        self.ensure_same_currency(other)?;
        Money::new(self.amount + other.amount, self.currency)
    }

    /// Subtracts another amount of the same currency.
    ///
    /// ## Errors
    /// Returns [`CoreError::NegativeAmount`] if the result would go
    /// negative. This is enforced, not clamped: callers that want
    /// floor-at-zero semantics (row totals, bucket finals) must check
    /// first - see `Money::subtract_or_zero`.
    pub fn subtract(&self, other: &Money) -> CoreResult<Money> {
        self.ensure_same_currency(other)?;
        Money::new(self.amount - other.amount, self.currency)
    }

    /// Subtracts another amount, clamping the result at zero.
    ///
    /// This is the explicit floor-at-zero variant used where the business
    /// rules say "discounts never push a total below zero".
    pub fn subtract_or_zero(&self, other: &Money) -> CoreResult<Money> {
        self.ensure_same_currency(other)?;
        if other.amount >= self.amount {
            return Ok(Money::zero(self.currency));
        }
        Money::new(self.amount - other.amount, self.currency)
    }

    /// Multiplies by a non-negative factor.
    pub fn multiply(&self, factor: Decimal) -> CoreResult<Money> {
        if factor.is_sign_negative() {
            return Err(CoreError::InvalidFactor {
                factor: factor.to_string(),
            });
        }
        Money::new(self.amount * factor, self.currency)
    }

    /// Divides by a strictly positive factor.
    pub fn divide(&self, factor: Decimal) -> CoreResult<Money> {
        if factor.is_sign_negative() || factor.is_zero() {
            return Err(CoreError::DivisionByZero {
                factor: factor.to_string(),
            });
        }
        Money::new(self.amount / factor, self.currency)
    }

    /// Currency-checked `>` comparison.
    pub fn is_greater_than(&self, other: &Money) -> CoreResult<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    /// Currency-checked `<` comparison.
    pub fn is_less_than(&self, other: &Money) -> CoreResult<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount < other.amount)
    }

    /// Currency-checked `<=` comparison.
    pub fn is_less_than_or_equal(&self, other: &Money) -> CoreResult<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount <= other.amount)
    }

    /// Currency-checked equality.
    ///
    /// Unlike `==` (which treats differing currencies as simply unequal),
    /// this raises on a currency mismatch so accidental cross-currency
    /// comparisons surface as errors.
    pub fn equals(&self, other: &Money) -> CoreResult<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount == other.amount)
    }

    /// Formats as a client-facing currency string with thousands grouping.
    ///
    /// ## Example
    /// ```rust
    /// use quotient_core::money::{Currency, Money};
    ///
    /// let m = Money::from_cents(1234550, Currency::Eur).unwrap();
    /// assert_eq!(m.format(), "€12,345.50");
    /// ```
    pub fn format(&self) -> String {
        let cents = self.to_cents();
        let major = cents / 100;
        let minor = cents % 100;

        // Group the major unit in blocks of three.
        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        format!("{}{}.{:02}", self.currency.symbol(), grouped, minor)
    }

    /// The single rounding point: half-up to 2 decimal places.
    fn round(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    pub(crate) fn ensure_same_currency(&self, other: &Money) -> CoreResult<()> {
        if self.currency != other.currency {
            return Err(CoreError::CurrencyMismatch {
                left: self.currency.code().to_string(),
                right: other.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use `format()` for client-facing output.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency.code())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rounds_to_two_places_at_creation() {
        let m = Money::new(dec!(100.123456), Currency::Eur).unwrap();
        assert_eq!(m.amount(), dec!(100.12));

        let up = Money::new(dec!(0.005), Currency::Eur).unwrap();
        assert_eq!(up.amount(), dec!(0.01));
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let a = Money::new(dec!(100.123456), Currency::Eur).unwrap();
        let b = Money::new(dec!(100.123456), Currency::Eur).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.amount(), Money::new(a.amount(), Currency::Eur).unwrap().amount());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = Money::new(dec!(-0.01), Currency::Eur).unwrap_err();
        assert!(matches!(err, CoreError::NegativeAmount { .. }));
    }

    #[test]
    fn test_cents_roundtrip() {
        let m = Money::from_cents(1099, Currency::Usd).unwrap();
        assert_eq!(m.amount(), dec!(10.99));
        assert_eq!(m.to_cents(), 1099);
    }

    #[test]
    fn test_add_and_subtract() {
        let a = Money::from_cents(1000, Currency::Eur).unwrap();
        let b = Money::from_cents(250, Currency::Eur).unwrap();

        assert_eq!(a.add(&b).unwrap().to_cents(), 1250);
        assert_eq!(a.subtract(&b).unwrap().to_cents(), 750);
    }

    #[test]
    fn test_subtract_below_zero_errors() {
        let a = Money::from_cents(100, Currency::Eur).unwrap();
        let b = Money::from_cents(200, Currency::Eur).unwrap();
        let err = a.subtract(&b).unwrap_err();
        assert!(matches!(err, CoreError::NegativeAmount { .. }));
    }

    #[test]
    fn test_subtract_or_zero_clamps() {
        let a = Money::from_cents(100, Currency::Eur).unwrap();
        let b = Money::from_cents(200, Currency::Eur).unwrap();
        assert!(a.subtract_or_zero(&b).unwrap().is_zero());
        assert_eq!(b.subtract_or_zero(&a).unwrap().to_cents(), 100);
    }

    #[test]
    fn test_currency_mismatch_is_hard_error() {
        let eur = Money::from_cents(100, Currency::Eur).unwrap();
        let usd = Money::from_cents(100, Currency::Usd).unwrap();

        assert!(matches!(
            eur.add(&usd).unwrap_err(),
            CoreError::CurrencyMismatch { .. }
        ));
        assert!(matches!(
            eur.subtract(&usd).unwrap_err(),
            CoreError::CurrencyMismatch { .. }
        ));
        assert!(matches!(
            eur.is_greater_than(&usd).unwrap_err(),
            CoreError::CurrencyMismatch { .. }
        ));
        assert!(matches!(
            eur.equals(&usd).unwrap_err(),
            CoreError::CurrencyMismatch { .. }
        ));
    }

    #[test]
    fn test_multiply_and_divide() {
        let m = Money::from_cents(1050, Currency::Eur).unwrap();

        assert_eq!(m.multiply(dec!(3)).unwrap().to_cents(), 3150);
        assert_eq!(m.multiply(dec!(0.5)).unwrap().to_cents(), 525);
        assert_eq!(m.divide(dec!(3)).unwrap().amount(), dec!(3.50));

        assert!(matches!(
            m.multiply(dec!(-1)).unwrap_err(),
            CoreError::InvalidFactor { .. }
        ));
        assert!(matches!(
            m.divide(Decimal::ZERO).unwrap_err(),
            CoreError::DivisionByZero { .. }
        ));
    }

    #[test]
    fn test_chained_operations_do_not_drift() {
        // Each intermediate is a Money, re-rounded at 2 places.
        let m = Money::from_cents(1000, Currency::Eur).unwrap();
        let third = m.divide(dec!(3)).unwrap(); // 3.33
        assert_eq!(third.amount(), dec!(3.33));
        let back: Money = third.multiply(dec!(3)).unwrap(); // 9.99, cent loss explicit
        assert_eq!(back.to_cents(), 999);
    }

    #[test]
    fn test_comparisons() {
        let small = Money::from_cents(100, Currency::Gbp).unwrap();
        let big = Money::from_cents(200, Currency::Gbp).unwrap();

        assert!(big.is_greater_than(&small).unwrap());
        assert!(small.is_less_than(&big).unwrap());
        assert!(small.is_less_than_or_equal(&small).unwrap());
        assert!(small.equals(&small).unwrap());
    }

    #[test]
    fn test_format() {
        assert_eq!(
            Money::from_cents(1234550, Currency::Eur).unwrap().format(),
            "€12,345.50"
        );
        assert_eq!(Money::from_cents(0, Currency::Usd).unwrap().format(), "$0.00");
        assert_eq!(
            Money::from_cents(99, Currency::Gbp).unwrap().format(),
            "£0.99"
        );
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!(" USD ".parse::<Currency>().unwrap(), Currency::Usd);
        assert!(matches!(
            "AUD".parse::<Currency>().unwrap_err(),
            CoreError::UnsupportedCurrency { .. }
        ));
    }
}
