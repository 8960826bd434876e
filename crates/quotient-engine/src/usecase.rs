//! # Pricing Use Cases
//!
//! Orchestration between the DTO boundary, the repository port and the
//! pure pricing core.
//!
//! ## Calculate Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingRequest                                                          │
//! │       │                                                                  │
//! │       ▼                                                                  │
//! │  1. validate input          ── fails → EngineError::Validation           │
//! │       │                        (NO repository call has happened yet)     │
//! │       ▼                                                                  │
//! │  2. fetch items by id       ── repo fails → Infrastructure               │
//! │       │                                                                  │
//! │       ▼                                                                  │
//! │  3. all ids found?          ── missing → NotFound { ids }                │
//! │       │                                                                  │
//! │       ▼                                                                  │
//! │  4. attach quantities, resolve discount code                             │
//! │       │                                                                  │
//! │       ▼                                                                  │
//! │  5. PricingCalculator::calculate_pricing (pure)                          │
//! │       │                                                                  │
//! │       ▼                                                                  │
//! │  PricingResponse (camelCase, calculatedAt stamped here)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use quotient_core::validation::{validate_discount_code, validate_quantity, validate_tax_rate};
use quotient_core::{Percentage, PricingCalculator, PricingItem, ValidationError};

use crate::dto::{CatalogItemDto, PricedItemDto, PricingRequest, PricingResponse};
use crate::error::{EngineError, EngineResult};
use crate::repository::ItemRepository;

/// Flat rate applied for any accepted discount code.
///
/// Code lookup against a campaign table is a later feature; until then
/// every non-blank code is worth the same 10%.
const DISCOUNT_CODE_RATE: Decimal = Decimal::TEN;

// =============================================================================
// Calculate Pricing
// =============================================================================

/// Prices a selection of catalog items, applying the optional discount
/// code and tax rate from the request.
pub struct CalculatePricingUseCase<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> CalculatePricingUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: PricingRequest) -> EngineResult<PricingResponse> {
        Self::validate(&request)?;

        debug!(item_count = request.item_ids.len(), "calculating pricing");

        let found = self.repository.find_by_ids(&request.item_ids).await?;
        let mut by_id: HashMap<String, PricingItem> = found
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();

        let missing: Vec<String> = request
            .item_ids
            .iter()
            .filter(|id| !by_id.contains_key(*id))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::NotFound { ids: missing });
        }

        let mut items = Vec::with_capacity(request.item_ids.len());
        for id in &request.item_ids {
            let item = by_id
                .remove(id)
                .ok_or_else(|| EngineError::unexpected(format!("item {id} lost after fetch")))?;
            // Validation guaranteed an entry per id.
            let quantity = request
                .quantities
                .get(id)
                .copied()
                .ok_or_else(|| EngineError::unexpected(format!("quantity for {id} lost")))?;
            items.push(item.update_quantity(quantity)?);
        }

        let discount = match &request.discount_code {
            Some(_) => Some(Percentage::new(DISCOUNT_CODE_RATE)?),
            None => None,
        };
        let tax_rate = match request.tax_rate {
            Some(rate) => Some(Percentage::new(rate)?),
            None => None,
        };

        let result =
            PricingCalculator::calculate_pricing(&items, discount.as_ref(), tax_rate.as_ref())?;

        let mut lines = Vec::with_capacity(items.len());
        for item in &items {
            let line_total = item.line_total()?;
            lines.push(PricedItemDto::from_item(item, &line_total));
        }

        Ok(PricingResponse {
            items: lines,
            subtotal: result.subtotal.amount(),
            discount: result.total_discount.amount(),
            discount_rate: discount.map(|d| d.value()).unwrap_or_default(),
            tax: result.tax.amount(),
            tax_rate: tax_rate.map(|t| t.value()).unwrap_or_default(),
            total: result.total.amount(),
            currency: result.total.currency().code().to_string(),
            calculated_at: Utc::now().to_rfc3339(),
        })
    }

    /// Rejects malformed input before the repository is touched.
    fn validate(request: &PricingRequest) -> Result<(), ValidationError> {
        if request.item_ids.is_empty() {
            return Err(ValidationError::Required {
                field: "itemIds".to_string(),
            });
        }

        for id in &request.item_ids {
            if id.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "itemIds".to_string(),
                });
            }

            match request.quantities.get(id) {
                Some(quantity) => validate_quantity(i64::from(*quantity))?,
                None => {
                    return Err(ValidationError::Required {
                        field: format!("quantities.{id}"),
                    })
                }
            }
        }

        if let Some(code) = &request.discount_code {
            validate_discount_code(code)?;
        }

        if let Some(rate) = request.tax_rate {
            validate_tax_rate(rate)?;
        }

        Ok(())
    }
}

// =============================================================================
// Get Pricing Items
// =============================================================================

/// Catalog listing for the item picker.
pub struct GetPricingItemsUseCase<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> GetPricingItemsUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// All catalog items in listing order.
    pub async fn execute(&self) -> EngineResult<Vec<CatalogItemDto>> {
        let items = self.repository.find_all().await?;
        debug!(count = items.len(), "listing catalog items");
        Ok(items.iter().map(CatalogItemDto::from).collect())
    }

    /// Catalog items within one category.
    pub async fn execute_for_category(
        &self,
        category_id: &str,
    ) -> EngineResult<Vec<CatalogItemDto>> {
        if category_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "categoryId".to_string(),
            }
            .into());
        }

        let items = self.repository.find_by_category(category_id).await?;
        Ok(items.iter().map(CatalogItemDto::from).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
