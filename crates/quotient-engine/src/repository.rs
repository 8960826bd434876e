//! # Item Repository Port
//!
//! The capability interface between the pricing core and whatever stores
//! the catalog. The persistence technology is out of scope and swappable:
//! the use cases only depend on this trait.
//!
//! ## Read/Write Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Pricing core reads:   find_by_id, find_by_ids, find_all,               │
//! │                        find_by_category                                 │
//! │                                                                         │
//! │  Admin UI exercises:   find_by_name, find_by_price_range,               │
//! │                        save, delete, exists, count, count_by_category   │
//! │                                                                         │
//! │  The port carries both so one adapter serves both consumers.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The bundled [`InMemoryItemRepository`] backs tests and demo setups.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use quotient_core::{Money, PricingItem};

use crate::error::RepositoryResult;

// =============================================================================
// Repository Port
// =============================================================================

/// Capability interface for catalog item storage.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetches one item by id; `None` when absent.
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<PricingItem>>;

    /// Fetches all items whose id is in `ids`.
    ///
    /// Missing ids are simply absent from the result - the caller decides
    /// whether that is an error.
    async fn find_by_ids(&self, ids: &[String]) -> RepositoryResult<Vec<PricingItem>>;

    /// All items, in insertion order.
    async fn find_all(&self) -> RepositoryResult<Vec<PricingItem>>;

    /// Items belonging to a category.
    async fn find_by_category(&self, category_id: &str) -> RepositoryResult<Vec<PricingItem>>;

    /// Items whose name contains `substring` (case-insensitive).
    async fn find_by_name(&self, substring: &str) -> RepositoryResult<Vec<PricingItem>>;

    /// Items whose base price lies within `[min, max]` in the same currency.
    async fn find_by_price_range(
        &self,
        min: &Money,
        max: &Money,
    ) -> RepositoryResult<Vec<PricingItem>>;

    /// Inserts or replaces an item by id.
    async fn save(&self, item: PricingItem) -> RepositoryResult<()>;

    /// Deletes an item; returns whether it existed.
    async fn delete(&self, id: &str) -> RepositoryResult<bool>;

    /// Whether an item with this id exists.
    async fn exists(&self, id: &str) -> RepositoryResult<bool>;

    /// Total item count.
    async fn count(&self) -> RepositoryResult<u64>;

    /// Item count within a category.
    async fn count_by_category(&self, category_id: &str) -> RepositoryResult<u64>;
}

// =============================================================================
// In-Memory Adapter
// =============================================================================

/// Thread-safe in-memory catalog, keyed by item id.
///
/// Preserves insertion order for `find_all` so listings are deterministic.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    inner: RwLock<Store>,
}

#[derive(Debug, Default)]
struct Store {
    items: HashMap<String, PricingItem>,
    insertion_order: Vec<String>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository pre-seeded with items.
    pub async fn seeded(items: Vec<PricingItem>) -> Self {
        let repo = Self::new();
        for item in items {
            // Seeding an in-memory store cannot fail.
            let _ = repo.save(item).await;
        }
        repo
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<PricingItem>> {
        debug!(id = %id, "find_by_id");
        Ok(self.inner.read().await.items.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> RepositoryResult<Vec<PricingItem>> {
        debug!(count = ids.len(), "find_by_ids");
        let store = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| store.items.get(id).cloned())
            .collect())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<PricingItem>> {
        let store = self.inner.read().await;
        Ok(store
            .insertion_order
            .iter()
            .filter_map(|id| store.items.get(id).cloned())
            .collect())
    }

    async fn find_by_category(&self, category_id: &str) -> RepositoryResult<Vec<PricingItem>> {
        debug!(category_id = %category_id, "find_by_category");
        let store = self.inner.read().await;
        Ok(store
            .insertion_order
            .iter()
            .filter_map(|id| store.items.get(id))
            .filter(|item| item.category.id == category_id)
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, substring: &str) -> RepositoryResult<Vec<PricingItem>> {
        let needle = substring.to_lowercase();
        let store = self.inner.read().await;
        Ok(store
            .insertion_order
            .iter()
            .filter_map(|id| store.items.get(id))
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_price_range(
        &self,
        min: &Money,
        max: &Money,
    ) -> RepositoryResult<Vec<PricingItem>> {
        let store = self.inner.read().await;
        Ok(store
            .insertion_order
            .iter()
            .filter_map(|id| store.items.get(id))
            .filter(|item| {
                // Cross-currency items never match a range query.
                item.base_price.is_less_than_or_equal(max).unwrap_or(false)
                    && min.is_less_than_or_equal(&item.base_price).unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn save(&self, item: PricingItem) -> RepositoryResult<()> {
        let mut store = self.inner.write().await;
        if !store.items.contains_key(&item.id) {
            store.insertion_order.push(item.id.clone());
        }
        store.items.insert(item.id.clone(), item);
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let mut store = self.inner.write().await;
        let existed = store.items.remove(id).is_some();
        store.insertion_order.retain(|existing| existing != id);
        Ok(existed)
    }

    async fn exists(&self, id: &str) -> RepositoryResult<bool> {
        Ok(self.inner.read().await.items.contains_key(id))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.inner.read().await.items.len() as u64)
    }

    async fn count_by_category(&self, category_id: &str) -> RepositoryResult<u64> {
        let store = self.inner.read().await;
        Ok(store
            .items
            .values()
            .filter(|item| item.category.id == category_id)
            .count() as u64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quotient_core::{Category, Currency};

    fn item(id: &str, name: &str, cents: i64, category: &str) -> PricingItem {
        PricingItem::new(
            id,
            name,
            None,
            Money::from_cents(cents, Currency::Eur).unwrap(),
            Category::new(format!("cat-{category}"), category, None, 1).unwrap(),
            1,
        )
        .unwrap()
    }

    async fn seeded() -> InMemoryItemRepository {
        InMemoryItemRepository::seeded(vec![
            item("a", "Webhosting Paket L", 10_000, "hosting"),
            item("b", "Einrichtung", 50_000, "setup"),
            item("c", "Domain", 1_500, "hosting"),
        ])
        .await
    }

    #[tokio::test]
    async fn test_find_by_id_and_missing() {
        let repo = seeded().await;
        assert!(repo.find_by_id("a").await.unwrap().is_some());
        assert!(repo.find_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_missing() {
        let repo = seeded().await;
        let found = repo
            .find_by_ids(&["a".to_string(), "ghost".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let repo = seeded().await;
        let ids: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_find_by_category() {
        let repo = seeded().await;
        let hosting = repo.find_by_category("cat-hosting").await.unwrap();
        assert_eq!(hosting.len(), 2);
        assert_eq!(repo.count_by_category("cat-setup").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_name_is_case_insensitive() {
        let repo = seeded().await;
        let found = repo.find_by_name("webhosting").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }

    #[tokio::test]
    async fn test_find_by_price_range() {
        let repo = seeded().await;
        let found = repo
            .find_by_price_range(
                &Money::from_cents(1_000, Currency::Eur).unwrap(),
                &Money::from_cents(20_000, Currency::Eur).unwrap(),
            )
            .await
            .unwrap();
        let ids: Vec<String> = found.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_save_delete_exists_count() {
        let repo = seeded().await;
        assert_eq!(repo.count().await.unwrap(), 3);

        repo.save(item("d", "Backup", 2_000, "hosting")).await.unwrap();
        assert!(repo.exists("d").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 4);

        assert!(repo.delete("d").await.unwrap());
        assert!(!repo.delete("d").await.unwrap());
        assert!(!repo.exists("d").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_replaces_by_id() {
        let repo = seeded().await;
        repo.save(item("a", "Webhosting Paket XL", 15_000, "hosting"))
            .await
            .unwrap();
        let updated = repo.find_by_id("a").await.unwrap().unwrap();
        assert_eq!(updated.name, "Webhosting Paket XL");
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
