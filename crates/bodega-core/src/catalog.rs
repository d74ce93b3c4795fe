//! Catalog service
//!
//! Item and category management with cache-first reads. Every write
//! invalidates the full set of keys that could contain the affected item;
//! invalidated keys stay absent until the next read repopulates them.

use crate::error::CoreError;
use bodega_cache::{CacheKey, ReadCache};
use bodega_model::{
    Category, CategoryDraft, CategoryId, CategoryPatch, Item, ItemDraft, ItemId, ItemPatch,
};
use bodega_store::{CategoryStore, ItemStore};
use std::sync::Arc;
use tracing::info;

/// Item and category management over the catalog store
pub struct CatalogService {
    items: Arc<dyn ItemStore>,
    categories: Arc<dyn CategoryStore>,
    cache: ReadCache,
}

impl CatalogService {
    /// Wire the service to its stores and cache
    #[inline]
    #[must_use]
    pub fn new(
        items: Arc<dyn ItemStore>,
        categories: Arc<dyn CategoryStore>,
        cache: ReadCache,
    ) -> Self {
        Self {
            items,
            categories,
            cache,
        }
    }

    /// List items, optionally restricted to a category (cache-first)
    pub async fn list_items(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Item>, CoreError> {
        let key = category.map_or(CacheKey::AllItems, CacheKey::ItemsByCategory);
        if let Some(items) = self.cache.fetch::<Vec<Item>>(&key).await {
            return Ok(items);
        }
        let items = self.items.list(category).await?;
        self.cache.store(&key, &items).await;
        Ok(items)
    }

    /// Get a single item by id (cache-first)
    pub async fn get_item(&self, id: ItemId) -> Result<Item, CoreError> {
        let key = CacheKey::Item(id);
        if let Some(item) = self.cache.fetch::<Item>(&key).await {
            return Ok(item);
        }
        let item = self
            .items
            .find(id)
            .await?
            .ok_or(CoreError::ItemNotFound(id))?;
        self.cache.store(&key, &item).await;
        Ok(item)
    }

    /// Create a new item
    pub async fn create_item(&self, draft: ItemDraft) -> Result<Item, CoreError> {
        validate_item_name(&draft.name)?;
        validate_price(draft.price)?;

        let item = self.items.insert(draft).await?;
        self.cache
            .invalidate_all_of(&CacheKey::for_item_write(item.id, item.category))
            .await;
        info!(item = %item.id, name = %item.name, "item created");
        Ok(item)
    }

    /// Apply a partial update to an item
    pub async fn update_item(&self, id: ItemId, patch: ItemPatch) -> Result<Item, CoreError> {
        if let Some(name) = &patch.name {
            validate_item_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }

        // The previous category's listing may still contain the item, so
        // its key is part of the invalidation set when the category moves.
        let before = self
            .items
            .find(id)
            .await?
            .ok_or(CoreError::ItemNotFound(id))?;
        let item = self
            .items
            .update(id, patch)
            .await?
            .ok_or(CoreError::ItemNotFound(id))?;

        let mut keys = CacheKey::for_item_write(item.id, item.category);
        if before.category != item.category {
            keys.push(CacheKey::ItemsByCategory(before.category));
        }
        self.cache.invalidate_all_of(&keys).await;
        info!(item = %item.id, "item updated");
        Ok(item)
    }

    /// Delete an item
    pub async fn delete_item(&self, id: ItemId) -> Result<Item, CoreError> {
        let item = self
            .items
            .delete(id)
            .await?
            .ok_or(CoreError::ItemNotFound(id))?;
        self.cache
            .invalidate_all_of(&CacheKey::for_item_write(item.id, item.category))
            .await;
        info!(item = %item.id, "item deleted");
        Ok(item)
    }

    /// List all categories
    pub async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        Ok(self.categories.list().await?)
    }

    /// Get a single category by id
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, CoreError> {
        self.categories
            .find(id)
            .await?
            .ok_or(CoreError::CategoryNotFound(id))
    }

    /// Create a new category; names are unique
    pub async fn create_category(&self, draft: CategoryDraft) -> Result<Category, CoreError> {
        if draft.name.trim().is_empty() {
            return Err(CoreError::Validation("category name is required".into()));
        }
        let category = self.categories.insert(draft).await?;
        info!(category = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Apply a partial update to a category
    pub async fn update_category(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Category, CoreError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(CoreError::Validation("category name is required".into()));
            }
        }
        self.categories
            .update(id, patch)
            .await?
            .ok_or(CoreError::CategoryNotFound(id))
    }

    /// Delete a category; items keep their dangling reference, as in the
    /// document model (no cascade)
    pub async fn delete_category(&self, id: CategoryId) -> Result<Category, CoreError> {
        self.categories
            .delete(id)
            .await?
            .ok_or(CoreError::CategoryNotFound(id))
    }
}

fn validate_item_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("item name is required".into()));
    }
    Ok(())
}

fn validate_price(price: rust_decimal::Decimal) -> Result<(), CoreError> {
    if price.is_sign_negative() {
        return Err(CoreError::Validation("price must be non-negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodega_cache::MokaBackend;
    use bodega_store::MemoryStore;
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn service() -> (Arc<MemoryStore>, CatalogService) {
        let store = Arc::new(MemoryStore::new());
        let cache = ReadCache::new(Arc::new(MokaBackend::new(64)), Duration::from_secs(600));
        let service = CatalogService::new(store.clone(), store.clone(), cache);
        (store, service)
    }

    #[tokio::test]
    async fn create_and_get_item() {
        let (_, service) = service();
        let category = service
            .create_category(CategoryDraft::new("Dairy"))
            .await
            .unwrap();

        let item = service
            .create_item(ItemDraft::new("Oat milk", category.id, Decimal::from(4)).with_stock(5))
            .await
            .unwrap();

        let fetched = service.get_item(item.id).await.unwrap();
        assert_eq!(fetched.name, "Oat milk");
        assert_eq!(fetched.stock_quantity, 5);
    }

    #[tokio::test]
    async fn get_missing_item_is_not_found() {
        let (_, service) = service();
        let err = service.get_item(ItemId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn create_item_rejects_blank_name() {
        let (_, service) = service();
        let err = service
            .create_item(ItemDraft::new("  ", CategoryId::new(), Decimal::ONE))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn create_item_rejects_negative_price() {
        let (_, service) = service();
        let err = service
            .create_item(ItemDraft::new("Oat milk", CategoryId::new(), Decimal::from(-1)))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn list_items_serves_cached_listing_until_write() {
        let (_, service) = service();
        let category = service
            .create_category(CategoryDraft::new("Bakery"))
            .await
            .unwrap();
        service
            .create_item(ItemDraft::new("Rye", category.id, Decimal::from(3)))
            .await
            .unwrap();

        let first = service.list_items(None).await.unwrap();
        assert_eq!(first.len(), 1);

        // Second read hits the cache; a write invalidates it
        let second = service.list_items(None).await.unwrap();
        assert_eq!(second, first);

        service
            .create_item(ItemDraft::new("Baguette", category.id, Decimal::from(2)))
            .await
            .unwrap();
        let third = service.list_items(None).await.unwrap();
        assert_eq!(third.len(), 2);
    }

    #[tokio::test]
    async fn category_move_invalidates_both_listings() {
        let (_, service) = service();
        let dairy = service
            .create_category(CategoryDraft::new("Dairy"))
            .await
            .unwrap();
        let chilled = service
            .create_category(CategoryDraft::new("Chilled"))
            .await
            .unwrap();
        let item = service
            .create_item(ItemDraft::new("Kefir", dairy.id, Decimal::from(3)))
            .await
            .unwrap();

        // Warm both category listings
        assert_eq!(service.list_items(Some(dairy.id)).await.unwrap().len(), 1);
        assert_eq!(service.list_items(Some(chilled.id)).await.unwrap().len(), 0);

        service
            .update_item(item.id, ItemPatch::new().category(chilled.id))
            .await
            .unwrap();

        assert_eq!(service.list_items(Some(dairy.id)).await.unwrap().len(), 0);
        assert_eq!(service.list_items(Some(chilled.id)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleted_item_disappears_from_cached_reads() {
        let (_, service) = service();
        let category = service
            .create_category(CategoryDraft::new("Pantry"))
            .await
            .unwrap();
        let item = service
            .create_item(ItemDraft::new("Lentils", category.id, Decimal::from(2)))
            .await
            .unwrap();

        service.get_item(item.id).await.unwrap();
        service.delete_item(item.id).await.unwrap();

        let err = service.get_item(item.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn duplicate_category_name_is_conflict() {
        let (_, service) = service();
        service
            .create_category(CategoryDraft::new("Dairy"))
            .await
            .unwrap();
        let err = service
            .create_category(CategoryDraft::new("Dairy"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }
}
