//! # Selected-Item Row Calculator
//!
//! One row of a quote: a selected catalog item with its own quantity,
//! discount and free-flag. The row calculator turns that into a
//! before/after/savings triple.
//!
//! ## Discount Application Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Unit application:                                                      │
//! │    effective unit = pct:   unit_price × (1 − d/100)                     │
//! │                     fixed: unit_price − d          (clamped ≥ 0)        │
//! │    after = effective unit × quantity                                    │
//! │                                                                         │
//! │  Total application (default):                                           │
//! │    discount amount = pct:   subtotal × d/100                            │
//! │                      fixed: d × quantity   ← PER-UNIT, not flat!        │
//! │    after = subtotal − discount amount      (clamped ≥ 0)                │
//! │                                                                         │
//! │  before is ALWAYS the undiscounted (tiered/flat) subtotal, so           │
//! │  savings = before − after regardless of mode.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The fixed-discount-per-unit behavior under Total application looks like
//! a bug but is load-bearing: existing quotes were priced with it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::tier::TierSchedule;

// =============================================================================
// Charge Classification
// =============================================================================

/// Unit strings that classify an item as a one-time charge.
const ONE_TIME_UNITS: [&str; 3] = ["one_time", "onetime", "setup"];

/// Whether a row bills once or every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    /// Billed once (setup category or one-time unit).
    OneTime,
    /// Billed every month (the default bucket).
    Monthly,
}

impl ChargeKind {
    /// Classifies a row from its category name and optional billing unit.
    ///
    /// A "setup" category or a one-time unit string → [`ChargeKind::OneTime`];
    /// everything else is monthly.
    pub fn classify(category_name: &str, unit: Option<&str>) -> Self {
        if category_name.eq_ignore_ascii_case(crate::category::SETUP_CATEGORY) {
            return ChargeKind::OneTime;
        }
        if let Some(unit) = unit {
            let unit = unit.trim().to_ascii_lowercase();
            if ONE_TIME_UNITS.contains(&unit.as_str()) {
                return ChargeKind::OneTime;
            }
        }
        ChargeKind::Monthly
    }
}

// =============================================================================
// Row Discount
// =============================================================================

/// How a row discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Value is a percentage of the price.
    Percentage,
    /// Value is a fixed money amount (in the row's currency), per unit.
    Fixed,
}

/// Where a row discount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountApplication {
    /// Discount the unit price, then multiply by quantity.
    Unit,
    /// Discount the row subtotal (the default).
    #[default]
    Total,
}

/// A per-row discount.
///
/// Percentage values are clamped to [0, 100] at construction (rows come
/// from free-form UI input; out-of-range is forgiven here, unlike the
/// strict [`Percentage`](crate::percentage::Percentage) value object).
/// Negative values are clamped to zero for both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowDiscount {
    value: Decimal,
    pub kind: DiscountKind,
    pub application: DiscountApplication,
}

impl RowDiscount {
    pub fn new(value: Decimal, kind: DiscountKind, application: DiscountApplication) -> Self {
        let mut value = value.max(Decimal::ZERO);
        if kind == DiscountKind::Percentage {
            value = value.min(Decimal::ONE_HUNDRED);
        }
        RowDiscount {
            value,
            kind,
            application,
        }
    }

    pub const fn value(&self) -> Decimal {
        self.value
    }
}

// =============================================================================
// Row Pricing & Row
// =============================================================================

/// How the row's undiscounted subtotal is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "tiers")]
pub enum RowPricing {
    /// quantity × unit price.
    Flat,
    /// Resolved against a tier schedule.
    Tiered(TierSchedule),
}

/// One selected pricing item instance in a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedItemRow {
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub charge: ChargeKind,
    pub quantity: u32,
    pub unit_price: Money,
    pub pricing: RowPricing,
    pub discount: Option<RowDiscount>,
    /// Forces the row total to zero, regardless of discount fields.
    pub is_free: bool,
}

/// The computed money triple for one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowTotals {
    /// Undiscounted (tiered/flat) subtotal - the savings baseline.
    pub before: Money,
    /// What the client actually pays for this row.
    pub after: Money,
    /// `before − after`, floored at zero.
    pub savings: Money,
}

impl SelectedItemRow {
    /// The undiscounted subtotal: tiered-resolved total for tiered rows,
    /// otherwise quantity × unit price.
    pub fn subtotal(&self) -> CoreResult<Money> {
        match &self.pricing {
            RowPricing::Tiered(schedule) => schedule.total_for(self.quantity),
            RowPricing::Flat => self.unit_price.multiply(Decimal::from(self.quantity)),
        }
    }

    /// Computes the row's before/after/savings triple.
    pub fn totals(&self) -> CoreResult<RowTotals> {
        let before = self.subtotal()?;
        let currency = before.currency();

        if self.is_free {
            // No discount math at all: the row is simply given away.
            let zero = Money::zero(currency);
            return Ok(RowTotals {
                before,
                after: zero,
                savings: before,
            });
        }

        let after = match &self.discount {
            None => before,
            Some(discount) => match discount.application {
                DiscountApplication::Unit => {
                    let effective_unit = match discount.kind {
                        DiscountKind::Percentage => {
                            let keep = Decimal::ONE - discount.value() / Decimal::ONE_HUNDRED;
                            self.unit_price.multiply(keep)?
                        }
                        DiscountKind::Fixed => {
                            let off = Money::new(discount.value(), currency)?;
                            self.unit_price.subtract_or_zero(&off)?
                        }
                    };
                    effective_unit.multiply(Decimal::from(self.quantity))?
                }
                DiscountApplication::Total => {
                    let off = match discount.kind {
                        DiscountKind::Percentage => {
                            before.multiply(discount.value() / Decimal::ONE_HUNDRED)?
                        }
                        // Fixed is per-unit even when applied to the total.
                        DiscountKind::Fixed => Money::new(
                            discount.value() * Decimal::from(self.quantity),
                            currency,
                        )?,
                    };
                    before.subtract_or_zero(&off)?
                }
            },
        };

        // Unit-mode discounts work from the row's list unit price, which
        // for tiered rows can exceed the tiered subtotal; savings never go
        // negative.
        let savings = before.subtract_or_zero(&after)?;

        Ok(RowTotals {
            before,
            after,
            savings,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
