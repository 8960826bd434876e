//! # Pricing Calculator
//!
//! Stateless aggregate calculations over lists of [`PricingItem`]s.
//!
//! ## Composition Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal ──► − discount ──► + tax ──► total                            │
//! │                                                                         │
//! │  Tax is computed on the POST-discount amount:                           │
//! │    350 @ 20% discount, 8.5% tax                                         │
//! │    → discount 70, taxable 280, tax 23.80, total 303.80                  │
//! │                                                                         │
//! │  NOT on the gross: 350 × 1.085 − 70 would give 309.75. Wrong.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function is a pure function of its inputs: calling twice with the
//! same arguments yields identical output.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::item::PricingItem;
use crate::money::{Currency, Money};
use crate::percentage::Percentage;
use crate::DEFAULT_CURRENCY;

// =============================================================================
// Result Types
// =============================================================================

/// The aggregate result of a pricing run.
///
/// Derived, never persisted - recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingCalculationResult {
    pub subtotal: Money,
    pub total_discount: Money,
    pub tax: Money,
    pub total: Money,
    /// What the client saved (equals the discount taken off).
    pub savings: Money,
    /// Savings as a share of the subtotal.
    pub savings_rate: Percentage,
}

/// Per-item breakdown produced by [`PricingCalculator::calculate_item_pricing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPricing {
    pub item_id: String,
    pub gross: Money,
    pub discount: Money,
    pub net: Money,
}

// =============================================================================
// Pricing Calculator
// =============================================================================

/// Stateless domain service; all operations are associated functions.
pub struct PricingCalculator;

impl PricingCalculator {
    /// Sum of `quantity × base_price` over all items.
    ///
    /// Returns zero (in the default currency) for an empty list. Mixed
    /// currencies in one list are a hard error.
    pub fn calculate_subtotal(items: &[PricingItem]) -> CoreResult<Money> {
        let currency = match Self::common_currency(items)? {
            Some(currency) => currency,
            None => return Ok(Money::zero(DEFAULT_CURRENCY)),
        };

        let mut sum = Money::zero(currency);
        for item in items {
            sum = sum.add(&item.line_total()?)?;
        }
        Ok(sum)
    }

    /// Alias of [`calculate_subtotal`](Self::calculate_subtotal): the total
    /// before any discount or tax.
    pub fn calculate_total(items: &[PricingItem]) -> CoreResult<Money> {
        Self::calculate_subtotal(items)
    }

    /// The amount a discount takes off.
    pub fn calculate_discount_amount(amount: &Money, discount: &Percentage) -> CoreResult<Money> {
        discount.calculate_discount(amount)
    }

    /// The amount remaining after a discount.
    pub fn apply_discount(amount: &Money, discount: &Percentage) -> CoreResult<Money> {
        discount.calculate_remaining(amount)
    }

    /// Tax on an amount.
    pub fn calculate_tax(amount: &Money, rate: &Percentage) -> CoreResult<Money> {
        rate.apply_to(amount)
    }

    /// Amount plus tax.
    pub fn calculate_total_with_tax(amount: &Money, rate: &Percentage) -> CoreResult<Money> {
        amount.add(&Self::calculate_tax(amount, rate)?)
    }

    /// Full pricing run: subtotal → discount → tax-on-discounted → total.
    pub fn calculate_pricing(
        items: &[PricingItem],
        discount: Option<&Percentage>,
        tax_rate: Option<&Percentage>,
    ) -> CoreResult<PricingCalculationResult> {
        let subtotal = Self::calculate_subtotal(items)?;

        let total_discount = match discount {
            Some(discount) => discount.calculate_discount(&subtotal)?,
            None => Money::zero(subtotal.currency()),
        };
        let after_discount = subtotal.subtract_or_zero(&total_discount)?;

        let tax = match tax_rate {
            Some(rate) => rate.apply_to(&after_discount)?,
            None => Money::zero(subtotal.currency()),
        };
        let total = after_discount.add(&tax)?;

        let savings_rate = if subtotal.is_zero() {
            Percentage::zero()
        } else {
            Percentage::from_fraction(total_discount.amount(), subtotal.amount())?
        };

        Ok(PricingCalculationResult {
            subtotal,
            total_discount,
            tax,
            total,
            savings: total_discount,
            savings_rate,
        })
    }

    /// Applies a per-item discount map and returns per-item breakdowns.
    ///
    /// Items without an entry in the map are undiscounted.
    pub fn calculate_item_pricing(
        items: &[PricingItem],
        discounts: &HashMap<String, Percentage>,
    ) -> CoreResult<Vec<ItemPricing>> {
        items
            .iter()
            .map(|item| {
                let gross = item.line_total()?;
                let discount = match discounts.get(&item.id) {
                    Some(pct) => pct.calculate_discount(&gross)?,
                    None => Money::zero(gross.currency()),
                };
                let net = gross.subtract_or_zero(&discount)?;
                Ok(ItemPricing {
                    item_id: item.id.clone(),
                    gross,
                    discount,
                    net,
                })
            })
            .collect()
    }

    /// Units to sell before fixed costs are covered:
    /// `ceil(fixed / (price − variable_cost))`.
    ///
    /// ## Errors
    /// [`CoreError::UnprofitablePrice`] when the unit price does not exceed
    /// the variable cost - there is no break-even point.
    pub fn calculate_break_even_point(
        fixed_costs: &Money,
        variable_cost_per_unit: &Money,
        price_per_unit: &Money,
    ) -> CoreResult<u64> {
        if price_per_unit.is_less_than_or_equal(variable_cost_per_unit)? {
            return Err(CoreError::UnprofitablePrice {
                price: price_per_unit.to_string(),
                variable_cost: variable_cost_per_unit.to_string(),
            });
        }
        fixed_costs.ensure_same_currency(price_per_unit)?;

        let margin = price_per_unit.subtract(variable_cost_per_unit)?;
        let units = (fixed_costs.amount() / margin.amount()).ceil();
        Ok(units.to_u64().unwrap_or(u64::MAX))
    }

    /// Profit margin as a percentage of the selling price.
    ///
    /// Floors at 0% when cost meets or exceeds the selling price - a
    /// loss-making price is reported as "no margin", not as an error.
    pub fn calculate_profit_margin(
        selling_price: &Money,
        cost: &Money,
    ) -> CoreResult<Percentage> {
        if cost.is_less_than(selling_price)? {
            let profit = selling_price.subtract(cost)?;
            Percentage::from_fraction(profit.amount(), selling_price.amount())
        } else {
            Ok(Percentage::zero())
        }
    }

    /// Combined savings from several discounts applied to one amount.
    ///
    /// Discount percentages are SUMMED and the sum capped at 100% before
    /// being applied once. This additive composition (not sequential/
    /// multiplicative application) is the contract existing quotes were
    /// priced under.
    pub fn calculate_total_savings(
        amount: &Money,
        discounts: &[Percentage],
    ) -> CoreResult<Money> {
        let sum: Decimal = discounts.iter().map(|d| d.value()).sum();
        let capped = Percentage::new(sum.min(Decimal::ONE_HUNDRED))?;
        capped.calculate_discount(amount)
    }

    /// The single currency shared by all items, or `None` for an empty list.
    fn common_currency(items: &[PricingItem]) -> CoreResult<Option<Currency>> {
        let Some(first) = items.first() else {
            return Ok(None);
        };
        let currency = first.base_price.currency();
        for item in &items[1..] {
            if item.base_price.currency() != currency {
                return Err(CoreError::CurrencyMismatch {
                    left: currency.code().to_string(),
                    right: item.base_price.currency().code().to_string(),
                });
            }
        }
        Ok(Some(currency))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use rust_decimal_macros::dec;

    fn eur(cents: i64) -> Money {
        Money::from_cents(cents, Currency::Eur).unwrap()
    }

    fn item(id: &str, price_cents: i64, qty: u32) -> PricingItem {
        PricingItem::new(
            id,
            format!("Item {id}"),
            None,
            eur(price_cents),
            Category::new("cat-hosting", "Hosting", None, 1).unwrap(),
            qty,
        )
        .unwrap()
    }

    fn pct(v: Decimal) -> Percentage {
        Percentage::new(v).unwrap()
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let items = vec![item("a", 10000, 2), item("b", 5000, 3)];
        assert_eq!(
            PricingCalculator::calculate_subtotal(&items).unwrap().to_cents(),
            35_000
        );
    }

    #[test]
    fn test_empty_list_is_zero() {
        let subtotal = PricingCalculator::calculate_subtotal(&[]).unwrap();
        assert!(subtotal.is_zero());
        assert_eq!(subtotal.currency(), DEFAULT_CURRENCY);
    }

    #[test]
    fn test_mixed_currencies_refused() {
        let items = vec![
            item("a", 10000, 1),
            PricingItem::new(
                "b",
                "Dollar item",
                None,
                Money::from_cents(5000, Currency::Usd).unwrap(),
                Category::new("cat-hosting", "Hosting", None, 1).unwrap(),
                1,
            )
            .unwrap(),
        ];
        assert!(matches!(
            PricingCalculator::calculate_subtotal(&items).unwrap_err(),
            CoreError::CurrencyMismatch { .. }
        ));
    }

    #[test]
    fn test_tax_is_computed_after_discount() {
        // 350 @ 20% discount, 8.5% tax → discount 70, total 303.80
        let items = vec![item("a", 10000, 2), item("b", 5000, 3)];
        let result = PricingCalculator::calculate_pricing(
            &items,
            Some(&pct(dec!(20))),
            Some(&pct(dec!(8.5))),
        )
        .unwrap();

        assert_eq!(result.subtotal.to_cents(), 35_000);
        assert_eq!(result.total_discount.to_cents(), 7_000);
        assert_eq!(result.tax.to_cents(), 2_380);
        assert_eq!(result.total.to_cents(), 30_380);
        assert_eq!(result.savings.to_cents(), 7_000);
        assert_eq!(result.savings_rate.value(), dec!(20));
    }

    #[test]
    fn test_pricing_without_discount_or_tax() {
        let items = vec![item("a", 10000, 2), item("b", 5000, 3)];
        let result = PricingCalculator::calculate_pricing(&items, None, None).unwrap();

        assert_eq!(result.subtotal.to_cents(), 35_000);
        assert!(result.total_discount.is_zero());
        assert!(result.tax.is_zero());
        assert_eq!(result.total.to_cents(), 35_000);
        assert!(result.savings_rate.is_zero());
    }

    #[test]
    fn test_item_pricing_with_discount_map() {
        let items = vec![item("a", 10000, 1), item("b", 5000, 2)];
        let mut discounts = HashMap::new();
        discounts.insert("a".to_string(), pct(dec!(50)));

        let breakdown =
            PricingCalculator::calculate_item_pricing(&items, &discounts).unwrap();

        assert_eq!(breakdown[0].gross.to_cents(), 10_000);
        assert_eq!(breakdown[0].discount.to_cents(), 5_000);
        assert_eq!(breakdown[0].net.to_cents(), 5_000);

        assert_eq!(breakdown[1].gross.to_cents(), 10_000);
        assert!(breakdown[1].discount.is_zero());
    }

    #[test]
    fn test_break_even_point() {
        // fixed 1000, price 50, variable 30 → ceil(1000/20) = 50 units
        let units = PricingCalculator::calculate_break_even_point(
            &eur(100_000),
            &eur(3_000),
            &eur(5_000),
        )
        .unwrap();
        assert_eq!(units, 50);

        // fractional result rounds up: fixed 1000, margin 30 → 34 units
        let units = PricingCalculator::calculate_break_even_point(
            &eur(100_000),
            &eur(2_000),
            &eur(5_000),
        )
        .unwrap();
        assert_eq!(units, 34);
    }

    #[test]
    fn test_break_even_refuses_unprofitable_price() {
        let err = PricingCalculator::calculate_break_even_point(
            &eur(100_000),
            &eur(5_000),
            &eur(5_000),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::UnprofitablePrice { .. }));
    }

    #[test]
    fn test_profit_margin_floors_at_zero() {
        // selling 100, cost 60 → 40%
        let margin =
            PricingCalculator::calculate_profit_margin(&eur(10_000), &eur(6_000)).unwrap();
        assert_eq!(margin.value(), dec!(40));

        // cost ≥ selling → 0%, not an error
        let margin =
            PricingCalculator::calculate_profit_margin(&eur(10_000), &eur(12_000)).unwrap();
        assert!(margin.is_zero());
    }

    #[test]
    fn test_total_savings_sums_and_caps() {
        let amount = eur(10_000);

        // 30% + 20% = 50% of 100 → 50, additive not multiplicative
        let savings = PricingCalculator::calculate_total_savings(
            &amount,
            &[pct(dec!(30)), pct(dec!(20))],
        )
        .unwrap();
        assert_eq!(savings.to_cents(), 5_000);

        // 80% + 50% caps at 100%
        let savings = PricingCalculator::calculate_total_savings(
            &amount,
            &[pct(dec!(80)), pct(dec!(50))],
        )
        .unwrap();
        assert_eq!(savings.to_cents(), 10_000);
    }

    #[test]
    fn test_idempotence() {
        let items = vec![item("a", 9999, 7)];
        let first = PricingCalculator::calculate_pricing(
            &items,
            Some(&pct(dec!(12.5))),
            Some(&pct(dec!(19))),
        )
        .unwrap();
        let second = PricingCalculator::calculate_pricing(
            &items,
            Some(&pct(dec!(12.5))),
            Some(&pct(dec!(19))),
        )
        .unwrap();
        assert_eq!(first, second);
    }
}
