//! # Category Module
//!
//! Ordered grouping entity for display and per-category summation.
//!
//! Categories carry an explicit `order` so the client-facing summary lists
//! "Setup" before "Hosting" regardless of insertion order. Comparison is by
//! `order` first, `name` second.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::CoreResult;
use crate::validation::{validate_display_name, validate_identifier};

/// Category name that marks its items as one-time charges.
pub const SETUP_CATEGORY: &str = "setup";

// =============================================================================
// Category
// =============================================================================

/// A display/aggregation group for pricing items.
///
/// Immutable: `with_order` returns a new instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Display/aggregation sequence; lower comes first.
    pub order: u32,
}

impl Category {
    /// Creates a category with validated id and name.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        order: u32,
    ) -> CoreResult<Self> {
        let id = id.into();
        let name = name.into();
        validate_identifier("category.id", &id)?;
        validate_display_name("category.name", &name)?;

        Ok(Category {
            id,
            name,
            description,
            order,
        })
    }

    /// Returns a copy with a different display order.
    pub fn with_order(&self, order: u32) -> Self {
        Category {
            order,
            ..self.clone()
        }
    }

    /// Whether items in this category are one-time (setup) charges.
    pub fn is_setup(&self) -> bool {
        self.name.eq_ignore_ascii_case(SETUP_CATEGORY)
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str, order: u32) -> Category {
        Category::new(format!("cat-{name}"), name, None, order).unwrap()
    }

    #[test]
    fn test_ordering_by_order_then_name() {
        let mut cats = vec![cat("Hosting", 2), cat("Beratung", 2), cat("Setup", 1)];
        cats.sort();

        let names: Vec<&str> = cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Setup", "Beratung", "Hosting"]);
    }

    #[test]
    fn test_rejects_blank_fields() {
        assert!(Category::new("", "Setup", None, 0).is_err());
        assert!(Category::new("cat-1", "  ", None, 0).is_err());
    }

    #[test]
    fn test_with_order_returns_new_instance() {
        let a = cat("Setup", 1);
        let b = a.with_order(5);
        assert_eq!(a.order, 1);
        assert_eq!(b.order, 5);
        assert_eq!(a.name, b.name);
    }

    #[test]
    fn test_setup_detection_is_case_insensitive() {
        assert!(cat("Setup", 0).is_setup());
        assert!(cat("SETUP", 0).is_setup());
        assert!(!cat("Hosting", 0).is_setup());
    }
}
