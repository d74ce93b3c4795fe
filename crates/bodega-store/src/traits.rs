//! Document-store traits
//!
//! The seams between the core services and whatever holds the documents.
//! All traits are object-safe so services can hold `Arc<dyn ItemStore>`
//! and tests can swap in counting or failing doubles.

use crate::error::StoreError;
use async_trait::async_trait;
use bodega_model::{
    Cart, Category, CategoryDraft, CategoryPatch, CategoryId, Item, ItemDraft, ItemId, ItemPatch,
    Order, OrderId, OrderStatus, PaymentStatus, TrackingId, UserId,
};

/// Catalog items: source of truth for price and stock
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Find an item by id
    async fn find(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// List all items, optionally restricted to a category
    async fn list(&self, category: Option<CategoryId>) -> Result<Vec<Item>, StoreError>;

    /// Insert a new item, assigning id and timestamps
    async fn insert(&self, draft: ItemDraft) -> Result<Item, StoreError>;

    /// Apply a partial update; `Ok(None)` when the item is absent
    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, StoreError>;

    /// Delete an item, returning the removed record
    async fn delete(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// Atomically decrement stock, but only if enough is available
    ///
    /// This is a single guarded update, not a read-then-write: under
    /// concurrent checkouts the guard is what keeps stock from going
    /// negative.
    ///
    /// # Errors
    /// `StoreError::InsufficientStock` when `quantity` exceeds the live
    /// stock at the moment of the update.
    async fn decrement_stock(
        &self,
        id: ItemId,
        quantity: u32,
    ) -> Result<Option<Item>, StoreError>;
}

/// Catalog categories; names are unique
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Find a category by id
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// List all categories
    async fn list(&self) -> Result<Vec<Category>, StoreError>;

    /// Insert a new category
    ///
    /// # Errors
    /// `StoreError::DuplicateName` when the name is already taken.
    async fn insert(&self, draft: CategoryDraft) -> Result<Category, StoreError>;

    /// Apply a partial update; `Ok(None)` when the category is absent
    async fn update(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, StoreError>;

    /// Delete a category, returning the removed record
    async fn delete(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;
}

/// Per-user carts; at most one per user
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Find the cart owned by a user
    async fn find_by_user(&self, user: UserId) -> Result<Option<Cart>, StoreError>;

    /// Create or replace the user's cart, refreshing `updated_at`
    async fn upsert(&self, cart: Cart) -> Result<Cart, StoreError>;

    /// Delete the user's cart document entirely
    async fn delete_by_user(&self, user: UserId) -> Result<Option<Cart>, StoreError>;
}

/// Placed orders
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order
    ///
    /// # Errors
    /// `StoreError::DuplicateTrackingId` when another order already
    /// carries the same tracking id.
    async fn insert(&self, order: Order) -> Result<Order, StoreError>;

    /// Find an order by id
    async fn find(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// Delete an order, returning the removed record
    async fn delete(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// All orders placed by a user, newest first
    async fn list_by_user(&self, user: UserId) -> Result<Vec<Order>, StoreError>;

    /// Locate an order by its tracking id
    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Option<Order>, StoreError>;

    /// Overwrite the fulfilment status; `Ok(None)` when the order is absent
    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError>;

    /// Overwrite the payment status; `Ok(None)` when the order is absent
    async fn update_payment_status(
        &self,
        id: OrderId,
        status: PaymentStatus,
    ) -> Result<Option<Order>, StoreError>;
}
