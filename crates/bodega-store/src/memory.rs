//! In-memory document store
//!
//! DashMap-backed implementation of all four store traits. Document-level
//! atomicity comes from mutating a record while its shard lock is held,
//! which is what makes [`ItemStore::decrement_stock`] a true guarded
//! update rather than a read-then-write.

use crate::error::StoreError;
use crate::traits::{CartStore, CategoryStore, ItemStore, OrderStore};
use async_trait::async_trait;
use bodega_model::{
    Cart, Category, CategoryDraft, CategoryId, CategoryPatch, Item, ItemDraft, ItemId, ItemPatch,
    Order, OrderId, OrderStatus, PaymentStatus, TrackingId, UserId,
};
use chrono::Utc;
use dashmap::DashMap;

/// In-memory backend holding every collection
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: DashMap<ItemId, Item>,
    categories: DashMap<CategoryId, Category>,
    carts: DashMap<UserId, Cart>,
    orders: DashMap<OrderId, Order>,
}

impl MemoryStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of stored orders
    #[inline]
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn find(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.items.get(&id).map(|entry| entry.clone()))
    }

    async fn list(&self, category: Option<CategoryId>) -> Result<Vec<Item>, StoreError> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .filter(|entry| category.map_or(true, |c| entry.category == c))
            .map(|entry| entry.clone())
            .collect();
        items.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(items)
    }

    async fn insert(&self, draft: ItemDraft) -> Result<Item, StoreError> {
        let now = Utc::now();
        let item = Item {
            id: ItemId::new(),
            name: draft.name,
            category: draft.category,
            price: draft.price,
            stock_quantity: draft.stock_quantity,
            is_available: draft.is_available,
            description: draft.description,
            images: draft.images,
            created_at: now,
            updated_at: now,
        };
        self.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, StoreError> {
        let Some(mut entry) = self.items.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(category) = patch.category {
            entry.category = category;
        }
        if let Some(price) = patch.price {
            entry.price = price;
        }
        if let Some(stock) = patch.stock_quantity {
            entry.stock_quantity = stock;
        }
        if let Some(available) = patch.is_available {
            entry.is_available = available;
        }
        if let Some(description) = patch.description {
            entry.description = Some(description);
        }
        if let Some(images) = patch.images {
            entry.images = images;
        }
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn delete(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.items.remove(&id).map(|(_, item)| item))
    }

    async fn decrement_stock(
        &self,
        id: ItemId,
        quantity: u32,
    ) -> Result<Option<Item>, StoreError> {
        // The shard lock held by get_mut makes the check-and-subtract
        // atomic with respect to other decrements of the same item.
        let Some(mut entry) = self.items.get_mut(&id) else {
            return Ok(None);
        };
        if entry.stock_quantity < quantity {
            return Err(StoreError::InsufficientStock {
                item: id,
                requested: quantity,
                available: entry.stock_quantity,
            });
        }
        entry.stock_quantity -= quantity;
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.categories.get(&id).map(|entry| entry.clone()))
    }

    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories: Vec<Category> =
            self.categories.iter().map(|entry| entry.clone()).collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn insert(&self, draft: CategoryDraft) -> Result<Category, StoreError> {
        // Linear scan is fine for the in-memory backend. The scan and the
        // insert are separate map operations, so two concurrent inserts of
        // the same name can both pass the check; an advisory guard, like
        // the cart service's add-time stock check.
        if self.categories.iter().any(|c| c.name == draft.name) {
            return Err(StoreError::DuplicateName(draft.name));
        }
        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            name: draft.name,
            description: draft.description,
            created_at: now,
            updated_at: now,
        };
        self.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, StoreError> {
        if let Some(new_name) = &patch.name {
            if self
                .categories
                .iter()
                .any(|c| c.name == *new_name && c.id != id)
            {
                return Err(StoreError::DuplicateName(new_name.clone()));
            }
        }
        let Some(mut entry) = self.categories.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(description) = patch.description {
            entry.description = Some(description);
        }
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn delete(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.categories.remove(&id).map(|(_, category)| category))
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn find_by_user(&self, user: UserId) -> Result<Option<Cart>, StoreError> {
        Ok(self.carts.get(&user).map(|entry| entry.clone()))
    }

    async fn upsert(&self, mut cart: Cart) -> Result<Cart, StoreError> {
        cart.updated_at = Utc::now();
        self.carts.insert(cart.user, cart.clone());
        Ok(cart)
    }

    async fn delete_by_user(&self, user: UserId) -> Result<Option<Cart>, StoreError> {
        Ok(self.carts.remove(&user).map(|(_, cart)| cart))
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, mut order: Order) -> Result<Order, StoreError> {
        if self
            .orders
            .iter()
            .any(|o| o.tracking_id == order.tracking_id)
        {
            return Err(StoreError::DuplicateTrackingId(
                order.tracking_id.to_string(),
            ));
        }
        let now = Utc::now();
        order.created_at = now;
        order.updated_at = now;
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(&id).map(|entry| entry.clone()))
    }

    async fn delete(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.remove(&id).map(|(_, order)| order))
    }

    async fn list_by_user(&self, user: UserId) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| entry.user == user)
            .map(|entry| entry.clone())
            .collect();
        orders.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(orders)
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Option<Order>, StoreError> {
        Ok(self
            .orders
            .iter()
            .find(|o| o.tracking_id == *tracking_id)
            .map(|entry| entry.clone()))
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        let Some(mut entry) = self.orders.get_mut(&id) else {
            return Ok(None);
        };
        entry.order_status = status;
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn update_payment_status(
        &self,
        id: OrderId,
        status: PaymentStatus,
    ) -> Result<Option<Order>, StoreError> {
        let Some(mut entry) = self.orders.get_mut(&id) else {
            return Ok(None);
        };
        entry.payment_status = status;
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }
}
