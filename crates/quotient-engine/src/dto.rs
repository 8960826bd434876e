//! # DTO Contracts
//!
//! The serialization boundary between the use cases and the UI layer.
//!
//! ## Wire Conventions
//! - camelCase field names
//! - monetary amounts as decimal strings (two places), never floats
//! - quantities as whole numbers; fractional quantities fail
//!   deserialization before any use case runs
//! - `calculatedAt` as an RFC 3339 timestamp
//!
//! DTOs mirror the domain but never leak domain types: the UI sees plain
//! strings and decimals.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quotient_core::{ItemPricing, Money, PricingItem};

// =============================================================================
// Request DTOs
// =============================================================================

/// Input contract of the pricing use case.
///
/// `quantities` must carry an entry for every id in `item_ids`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub item_ids: Vec<String>,
    pub quantities: HashMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    /// Tax percentage (e.g. `19` for 19%); omitted means no tax line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
}

// =============================================================================
// Response DTOs
// =============================================================================

/// One priced line in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItemDto {
    pub id: String,
    pub name: String,
    pub base_price: Decimal,
    pub quantity: u32,
    /// `basePrice × quantity`, before the quote-level discount.
    pub total: Decimal,
    pub currency: String,
}

impl PricedItemDto {
    pub fn from_item(item: &PricingItem, line_total: &Money) -> Self {
        PricedItemDto {
            id: item.id.clone(),
            name: item.name.clone(),
            base_price: item.base_price.amount(),
            quantity: item.quantity,
            total: line_total.amount(),
            currency: item.base_price.currency().code().to_string(),
        }
    }
}

/// Output contract of the pricing use case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub items: Vec<PricedItemDto>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    /// The discount as a percentage of the subtotal.
    pub discount_rate: Decimal,
    pub tax: Decimal,
    pub tax_rate: Decimal,
    pub total: Decimal,
    pub currency: String,
    /// RFC 3339, UTC.
    pub calculated_at: String,
}

/// Catalog listing line (no quote context attached).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base_price: Decimal,
    pub currency: String,
    pub category_id: String,
    pub category_name: String,
    /// Charged once rather than monthly.
    pub one_time: bool,
}

impl From<&PricingItem> for CatalogItemDto {
    fn from(item: &PricingItem) -> Self {
        CatalogItemDto {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            base_price: item.base_price.amount(),
            currency: item.base_price.currency().code().to_string(),
            category_id: item.category.id.clone(),
            category_name: item.category.name.clone(),
            one_time: item.is_one_time(),
        }
    }
}

/// Per-item discount breakdown line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPricingDto {
    pub item_id: String,
    pub gross: Decimal,
    pub discount: Decimal,
    pub net: Decimal,
    pub currency: String,
}

impl From<&ItemPricing> for ItemPricingDto {
    fn from(pricing: &ItemPricing) -> Self {
        ItemPricingDto {
            item_id: pricing.item_id.clone(),
            gross: pricing.gross.amount(),
            discount: pricing.discount.amount(),
            net: pricing.net.amount(),
            currency: pricing.gross.currency().code().to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
