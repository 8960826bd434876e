//! # Pricing Item Module
//!
//! A priced, quantified catalog line with category membership.
//!
//! `PricingItem` is immutable: `update_quantity` and `apply_discount`
//! return new instances rather than mutating in place. Items are
//! constructed from persisted rows (by the out-of-scope mapping layer) or
//! from use-case input, and consumed read-only by the calculator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::percentage::Percentage;
use crate::validation::{validate_item_id, validate_item_name, validate_quantity};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Pricing Item
// =============================================================================

/// A catalog line: base price, category and a bounded quantity.
///
/// ## Invariants
/// - `quantity` in [1, 10,000] - guards against runaway multiplication
/// - `id` and `name` non-empty, bounded in length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_price: Money,
    pub category: Category,
    pub quantity: u32,
    /// When the item was created in the catalog.
    pub created_at: DateTime<Utc>,
}

impl PricingItem {
    /// Creates an item with validated id, name and quantity.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        base_price: Money,
        category: Category,
        quantity: u32,
    ) -> CoreResult<Self> {
        let id = id.into();
        let name = name.into();

        validate_item_id(&id)?;
        validate_item_name(&name)?;
        validate_quantity(i64::from(quantity))?;

        Ok(PricingItem {
            id,
            name,
            description,
            base_price,
            category,
            quantity,
            created_at: Utc::now(),
        })
    }

    /// Returns a copy with a different quantity.
    ///
    /// ## Errors
    /// Validation error for quantities outside [1, 10,000].
    pub fn update_quantity(&self, quantity: u32) -> CoreResult<Self> {
        validate_quantity(i64::from(quantity))?;
        Ok(PricingItem {
            quantity,
            ..self.clone()
        })
    }

    /// Returns a copy with the base price discounted by `discount`.
    pub fn apply_discount(&self, discount: &Percentage) -> CoreResult<Self> {
        let discounted = discount.calculate_remaining(&self.base_price)?;
        Ok(PricingItem {
            base_price: discounted,
            ..self.clone()
        })
    }

    /// Line total: base price × quantity.
    pub fn line_total(&self) -> CoreResult<Money> {
        self.base_price
            .multiply(rust_decimal::Decimal::from(self.quantity))
    }

    /// Whether this item's charge is one-time (setup category).
    pub fn is_one_time(&self) -> bool {
        self.category.is_setup()
    }
}

/// Guard used by mapping layers that receive a raw quantity from outside.
pub fn clamp_check_quantity(quantity: i64) -> Result<u32, ValidationError> {
    validate_quantity(quantity)?;
    // validate_quantity bounds it to 1..=MAX_ITEM_QUANTITY, which fits u32
    debug_assert!(quantity <= MAX_ITEM_QUANTITY);
    Ok(quantity as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================
