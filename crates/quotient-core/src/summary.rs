//! # Quote Summary Module
//!
//! Splits rows into one-time vs. monthly buckets, applies the global
//! discount, and derives the client-facing summary numbers.
//!
//! ## Bucketing & Scope
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rows ──► one-time bucket (setup / one-time unit)                       │
//! │       └─► monthly bucket (everything else)                              │
//! │                                                                         │
//! │  global discount scope:                                                 │
//! │    none    │ both buckets unchanged                                     │
//! │    both    │ discount applied to each bucket independently              │
//! │    monthly │ only the monthly bucket discounted                         │
//! │    onetime │ only the one-time bucket discounted                        │
//! │                                                                         │
//! │  fixed global discounts subtract ONCE PER TARGETED BUCKET, not per item │
//! │                                                                         │
//! │  yearly            = monthly_final × 12                                 │
//! │  totalProjectCost  = one_time_final + yearly_final                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bucket subtotals are sums of row totals AFTER row-level discounts and
//! BEFORE the global discount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{Currency, Money};
use crate::percentage::Percentage;
use crate::row::{ChargeKind, SelectedItemRow};
use crate::DEFAULT_CURRENCY;

/// Months per year, for the yearly projection.
const MONTHS_PER_YEAR: u32 = 12;

// =============================================================================
// Global Discount
// =============================================================================

/// Which bucket(s) a global discount affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountScope {
    /// No bucket is discounted.
    #[default]
    None,
    /// Both buckets, each discounted independently.
    Both,
    /// Only the monthly bucket.
    Monthly,
    /// Only the one-time bucket.
    OneTime,
}

/// The value of a global discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "amount")]
pub enum GlobalDiscountKind {
    /// Percentage taken off each targeted bucket.
    Percentage(Percentage),
    /// Fixed amount subtracted once per targeted bucket.
    Fixed(Money),
}

/// A single discount applied across one or more buckets, independent of
/// per-row discounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalDiscount {
    pub kind: GlobalDiscountKind,
    pub scope: DiscountScope,
}

impl GlobalDiscount {
    pub fn new(kind: GlobalDiscountKind, scope: DiscountScope) -> Self {
        GlobalDiscount { kind, scope }
    }

    /// Applies this discount to one bucket subtotal, clamping at zero.
    fn apply(&self, subtotal: &Money) -> CoreResult<Money> {
        match &self.kind {
            GlobalDiscountKind::Percentage(rate) => rate.calculate_remaining(subtotal),
            GlobalDiscountKind::Fixed(amount) => subtotal.subtract_or_zero(amount),
        }
    }
}

// =============================================================================
// Quote Summary
// =============================================================================

/// Post-row-discount subtotal for one category, for the report renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// The bucketed summary consumed by report rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// One-time bucket before the global discount.
    pub one_time_subtotal: Money,
    /// Monthly bucket before the global discount.
    pub monthly_subtotal: Money,
    /// One-time bucket after the global discount.
    pub one_time_total: Money,
    /// Monthly bucket after the global discount.
    pub monthly_total: Money,
    /// `monthly_total × 12`.
    pub yearly_total: Money,
    /// `one_time_total + yearly_total`.
    pub total_project_cost: Money,
    /// All pre-discount row values minus what the client actually pays
    /// (one-time + one month).
    pub total_savings: Money,
    /// Share of the savings that comes from rows given away for free.
    pub savings_from_free_items: Money,
    /// Everything else: row discounts plus the global discount.
    pub savings_from_discounts: Money,
    /// Per-category subtotals (post row discount), sorted by category name.
    pub category_totals: Vec<CategoryTotal>,
}

/// Computes the bucketed quote summary for a set of rows.
///
/// Empty input produces an all-zero summary in the default currency.
/// Rows priced in different currencies are refused.
pub fn summarize(
    rows: &[SelectedItemRow],
    global_discount: Option<&GlobalDiscount>,
) -> CoreResult<QuoteSummary> {
    let currency = common_currency(rows)?.unwrap_or(DEFAULT_CURRENCY);

    let mut one_time_subtotal = Money::zero(currency);
    let mut monthly_subtotal = Money::zero(currency);
    let mut before_sum = Money::zero(currency);
    let mut free_savings = Money::zero(currency);
    let mut category_totals: Vec<CategoryTotal> = Vec::new();

    for row in rows {
        let totals = row.totals()?;
        before_sum = before_sum.add(&totals.before)?;
        if row.is_free {
            free_savings = free_savings.add(&totals.savings)?;
        }

        match row.charge {
            ChargeKind::OneTime => {
                one_time_subtotal = one_time_subtotal.add(&totals.after)?;
            }
            ChargeKind::Monthly => {
                monthly_subtotal = monthly_subtotal.add(&totals.after)?;
            }
        }

        match category_totals
            .iter_mut()
            .find(|entry| entry.category == row.category)
        {
            Some(entry) => entry.total = entry.total.add(&totals.after)?,
            None => category_totals.push(CategoryTotal {
                category: row.category.clone(),
                total: totals.after,
            }),
        }
    }
    category_totals.sort_by(|a, b| a.category.cmp(&b.category));

    let (one_time_total, monthly_total) = match global_discount {
        None => (one_time_subtotal, monthly_subtotal),
        Some(discount) => match discount.scope {
            DiscountScope::None => (one_time_subtotal, monthly_subtotal),
            DiscountScope::Both => (
                discount.apply(&one_time_subtotal)?,
                discount.apply(&monthly_subtotal)?,
            ),
            DiscountScope::Monthly => {
                (one_time_subtotal, discount.apply(&monthly_subtotal)?)
            }
            DiscountScope::OneTime => {
                (discount.apply(&one_time_subtotal)?, monthly_subtotal)
            }
        },
    };

    let yearly_total = monthly_total.multiply(Decimal::from(MONTHS_PER_YEAR))?;
    let total_project_cost = one_time_total.add(&yearly_total)?;

    let paid = one_time_total.add(&monthly_total)?;
    let total_savings = before_sum.subtract_or_zero(&paid)?;
    let savings_from_discounts = total_savings.subtract_or_zero(&free_savings)?;

    Ok(QuoteSummary {
        one_time_subtotal,
        monthly_subtotal,
        one_time_total,
        monthly_total,
        yearly_total,
        total_project_cost,
        total_savings,
        savings_from_free_items: free_savings,
        savings_from_discounts,
        category_totals,
    })
}

fn common_currency(rows: &[SelectedItemRow]) -> CoreResult<Option<Currency>> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };
    let currency = first.unit_price.currency();
    for row in &rows[1..] {
        if row.unit_price.currency() != currency {
            return Err(CoreError::CurrencyMismatch {
                left: currency.code().to_string(),
                right: row.unit_price.currency().code().to_string(),
            });
        }
    }
    Ok(Some(currency))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{DiscountApplication, DiscountKind, RowDiscount, RowPricing};
    use rust_decimal_macros::dec;

    fn eur(cents: i64) -> Money {
        Money::from_cents(cents, Currency::Eur).unwrap()
    }

    fn row(
        id: &str,
        category: &str,
        charge: ChargeKind,
        unit_cents: i64,
        qty: u32,
    ) -> SelectedItemRow {
        SelectedItemRow {
            item_id: id.to_string(),
            name: format!("Item {id}"),
            category: category.to_string(),
            charge,
            quantity: qty,
            unit_price: eur(unit_cents),
            pricing: RowPricing::Flat,
            discount: None,
            is_free: false,
        }
    }

    /// Fixed scenario: one-time €100, monthly €200.
    fn fixture() -> Vec<SelectedItemRow> {
        vec![
            row("setup", "Setup", ChargeKind::OneTime, 10_000, 1),
            row("hosting", "Hosting", ChargeKind::Monthly, 10_000, 2),
        ]
    }

    fn ten_percent(scope: DiscountScope) -> GlobalDiscount {
        GlobalDiscount::new(
            GlobalDiscountKind::Percentage(Percentage::new(dec!(10)).unwrap()),
            scope,
        )
    }

    #[test]
    fn test_scope_none_changes_nothing() {
        let summary = summarize(&fixture(), Some(&ten_percent(DiscountScope::None))).unwrap();
        assert_eq!(summary.one_time_total.to_cents(), 10_000);
        assert_eq!(summary.monthly_total.to_cents(), 20_000);
        assert_eq!(summary.yearly_total.to_cents(), 240_000);
    }

    #[test]
    fn test_scope_both_discounts_each_bucket() {
        let summary = summarize(&fixture(), Some(&ten_percent(DiscountScope::Both))).unwrap();
        assert_eq!(summary.one_time_total.to_cents(), 9_000);
        assert_eq!(summary.monthly_total.to_cents(), 18_000);
        assert_eq!(summary.yearly_total.to_cents(), 216_000);
        assert_eq!(summary.total_project_cost.to_cents(), 225_000);
    }

    #[test]
    fn test_scope_monthly_only() {
        let summary =
            summarize(&fixture(), Some(&ten_percent(DiscountScope::Monthly))).unwrap();
        assert_eq!(summary.one_time_total.to_cents(), 10_000);
        assert_eq!(summary.monthly_total.to_cents(), 18_000);
        assert_eq!(summary.yearly_total.to_cents(), 216_000);
    }

    #[test]
    fn test_scope_onetime_only() {
        let summary =
            summarize(&fixture(), Some(&ten_percent(DiscountScope::OneTime))).unwrap();
        assert_eq!(summary.one_time_total.to_cents(), 9_000);
        assert_eq!(summary.monthly_total.to_cents(), 20_000);
    }

    #[test]
    fn test_fixed_discount_subtracted_once_per_bucket() {
        // €50 off both buckets: one-time 100−50=50, monthly 200−50=150.
        let discount = GlobalDiscount::new(
            GlobalDiscountKind::Fixed(eur(5_000)),
            DiscountScope::Both,
        );
        let summary = summarize(&fixture(), Some(&discount)).unwrap();
        assert_eq!(summary.one_time_total.to_cents(), 5_000);
        assert_eq!(summary.monthly_total.to_cents(), 15_000);
    }

    #[test]
    fn test_oversized_fixed_discount_clamps_bucket_to_zero() {
        let discount = GlobalDiscount::new(
            GlobalDiscountKind::Fixed(eur(100_000)),
            DiscountScope::OneTime,
        );
        let summary = summarize(&fixture(), Some(&discount)).unwrap();
        assert!(summary.one_time_total.is_zero());
        assert_eq!(summary.monthly_total.to_cents(), 20_000);
    }

    #[test]
    fn test_savings_split_free_vs_discounts() {
        let mut rows = fixture();
        // A free monthly row worth €30.
        let mut free = row("bonus", "Hosting", ChargeKind::Monthly, 3_000, 1);
        free.is_free = true;
        rows.push(free);
        // A row-level 50% discount on a €40 one-time row.
        let mut discounted = row("migration", "Setup", ChargeKind::OneTime, 4_000, 1);
        discounted.discount = Some(RowDiscount::new(
            dec!(50),
            DiscountKind::Percentage,
            DiscountApplication::Total,
        ));
        rows.push(discounted);

        let summary = summarize(&rows, Some(&ten_percent(DiscountScope::Monthly))).unwrap();

        // before sum: 100 + 200 + 30 + 40 = 370
        // paid: one-time (100 + 20) + monthly (200 × 0.9) = 120 + 180 = 300
        assert_eq!(summary.total_savings.to_cents(), 7_000);
        assert_eq!(summary.savings_from_free_items.to_cents(), 3_000);
        assert_eq!(summary.savings_from_discounts.to_cents(), 4_000);
    }

    #[test]
    fn test_category_totals_sorted_by_name() {
        let summary = summarize(&fixture(), None).unwrap();
        let names: Vec<&str> = summary
            .category_totals
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(names, vec!["Hosting", "Setup"]);
        assert_eq!(summary.category_totals[0].total.to_cents(), 20_000);
        assert_eq!(summary.category_totals[1].total.to_cents(), 10_000);
    }

    #[test]
    fn test_empty_rows_produce_zero_summary() {
        let summary = summarize(&[], None).unwrap();
        assert!(summary.total_project_cost.is_zero());
        assert!(summary.category_totals.is_empty());
        assert_eq!(summary.one_time_total.currency(), DEFAULT_CURRENCY);
    }

    #[test]
    fn test_global_discount_wire_shape_is_tagged() {
        let pct = GlobalDiscountKind::Percentage(Percentage::new(dec!(10)).unwrap());
        let value = serde_json::to_value(&pct).unwrap();
        assert_eq!(value["type"], "percentage");

        let scope = serde_json::to_value(&DiscountScope::OneTime).unwrap();
        assert_eq!(scope, serde_json::json!("one_time"));
    }

    #[test]
    fn test_mixed_currencies_refused() {
        let mut rows = fixture();
        let mut usd_row = row("usd", "Hosting", ChargeKind::Monthly, 1_000, 1);
        usd_row.unit_price = Money::from_cents(1_000, Currency::Usd).unwrap();
        rows.push(usd_row);

        assert!(matches!(
            summarize(&rows, None).unwrap_err(),
            CoreError::CurrencyMismatch { .. }
        ));
    }
}
