//! # Tiered Pricing Module
//!
//! Resolves an item's effective unit price for a quantity against a tier
//! schedule.
//!
//! ## Resolution Scheme
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Schedule:  [1..10] → €5.00    [11..] → €4.00                           │
//! │                                                                         │
//! │  qty 10  → tier [1..10]  → unit €5.00 → total €50.00                    │
//! │  qty 11  → tier [11..]   → unit €4.00 → total €44.00                    │
//! │  qty 10k → tier [11..]   → unit €4.00 → total €40,000.00                │
//! │                                                                         │
//! │  The CURRENT tier's rate applies to the WHOLE quantity.                 │
//! │  This is not a graduated/marginal scheme - do not change it.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edge rules:
//! - quantity below the first tier's minimum → first tier's price (floor)
//! - quantity above the last closed tier with no open-ended tier → last
//!   tier's price (clamp; pinned by test)

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Pricing Tier
// =============================================================================

/// One quantity band with its unit price.
///
/// `max_quantity = None` means open-ended: the band matches any quantity
/// at or above `min_quantity`. Only the last tier may be open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub min_quantity: u32,
    pub max_quantity: Option<u32>,
    pub unit_price: Money,
}

impl PricingTier {
    pub fn new(min_quantity: u32, max_quantity: Option<u32>, unit_price: Money) -> Self {
        PricingTier {
            min_quantity,
            max_quantity,
            unit_price,
        }
    }

    /// Whether this band contains the quantity.
    fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity
            && self.max_quantity.map_or(true, |max| quantity <= max)
    }
}

// =============================================================================
// Tier Schedule
// =============================================================================

/// An ordered, non-overlapping set of pricing tiers.
///
/// Validated once at construction; `resolve` can then never miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSchedule {
    tiers: Vec<PricingTier>,
}

impl TierSchedule {
    /// Builds a schedule, validating structure.
    ///
    /// ## Rules
    /// - at least one tier
    /// - every tier has `min_quantity >= 1` and, when closed,
    ///   `max_quantity >= min_quantity`
    /// - tiers are ascending by `min_quantity` with no gaps in ordering
    ///   and no overlap
    /// - only the last tier may be open-ended
    pub fn new(tiers: Vec<PricingTier>) -> CoreResult<Self> {
        if tiers.is_empty() {
            return Err(CoreError::InvalidTierSchedule {
                reason: "schedule must contain at least one tier".to_string(),
            });
        }

        for (idx, tier) in tiers.iter().enumerate() {
            if tier.min_quantity == 0 {
                return Err(CoreError::InvalidTierSchedule {
                    reason: format!("tier {idx} has min_quantity 0"),
                });
            }
            if let Some(max) = tier.max_quantity {
                if max < tier.min_quantity {
                    return Err(CoreError::InvalidTierSchedule {
                        reason: format!("tier {idx} has max_quantity below min_quantity"),
                    });
                }
            } else if idx != tiers.len() - 1 {
                return Err(CoreError::InvalidTierSchedule {
                    reason: format!("tier {idx} is open-ended but not last"),
                });
            }
        }

        for window in tiers.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            // prev is closed here: open-ended non-last was rejected above
            let prev_max = prev.max_quantity.unwrap_or(u32::MAX);
            if next.min_quantity <= prev_max {
                return Err(CoreError::InvalidTierSchedule {
                    reason: format!(
                        "tiers overlap: [{}..{}] then [{}..]",
                        prev.min_quantity, prev_max, next.min_quantity
                    ),
                });
            }
        }

        Ok(TierSchedule { tiers })
    }

    /// The tiers in ascending order.
    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }

    /// Resolves the effective unit price for a quantity.
    ///
    /// Below the first tier → first tier (floor). Above every closed tier
    /// with no open tier → last tier (clamp).
    pub fn resolve(&self, quantity: u32) -> &PricingTier {
        let first = self.tiers.first().expect("schedule is never empty");
        if quantity < first.min_quantity {
            return first;
        }

        self.tiers
            .iter()
            .find(|tier| tier.contains(quantity))
            .unwrap_or_else(|| self.tiers.last().expect("schedule is never empty"))
    }

    /// Resolved line total: the matching tier's unit price × the whole
    /// quantity (current-tier-rate scheme).
    pub fn total_for(&self, quantity: u32) -> CoreResult<Money> {
        self.resolve(quantity)
            .unit_price
            .multiply(rust_decimal::Decimal::from(quantity))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
