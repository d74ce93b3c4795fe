//! Checkout engine
//!
//! Converts a cart into a durable order while consuming stock:
//!
//! 1. Load the cart (absent or lineless fails with `EmptyCart`)
//! 2. Pre-validate every line against live items, before any mutation
//! 3. Commit pass: guarded stock decrement per line, accumulating the
//!    total and the order-line snapshot
//! 4. Persist the order (Processing/Paid), delete the cart
//! 5. Invalidate the order-history and catalog cache entries
//!
//! The commit pass spans multiple documents without a transaction. A
//! guarded decrement that fails mid-pass (a race lost after pre-validation
//! succeeded) aborts the checkout and leaves earlier decrements in place;
//! there is no compensating rollback. The guard itself still holds the
//! hard invariant: stock never goes negative, and each checkout decrements
//! each item exactly once.

use crate::error::CoreError;
use bodega_cache::{CacheKey, ReadCache};
use bodega_model::{Order, OrderLine, OrderStatus, PaymentStatus, TrackingId, UserId};
use bodega_store::{CartStore, ItemStore, OrderStore};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Cart-to-order conversion
pub struct CheckoutEngine {
    items: Arc<dyn ItemStore>,
    carts: Arc<dyn CartStore>,
    orders: Arc<dyn OrderStore>,
    cache: ReadCache,
    tracking_id_len: usize,
}

impl CheckoutEngine {
    /// Wire the engine to its stores and cache
    #[inline]
    #[must_use]
    pub fn new(
        items: Arc<dyn ItemStore>,
        carts: Arc<dyn CartStore>,
        orders: Arc<dyn OrderStore>,
        cache: ReadCache,
        tracking_id_len: usize,
    ) -> Self {
        Self {
            items,
            carts,
            orders,
            cache,
            tracking_id_len,
        }
    }

    /// Check out the user's cart
    ///
    /// # Errors
    /// - `EmptyCart` when the cart is absent or has no lines
    /// - `ItemNotFound` when a line references a deleted item
    /// - `StockExceeded` when a line exceeds live stock, either during
    ///   pre-validation (no side effects) or during the commit pass
    ///   (earlier decrements stand)
    /// - `Store` for persistence failures, including a tracking-id
    ///   collision on insert
    pub async fn checkout(&self, user: UserId) -> Result<Order, CoreError> {
        let cart = self
            .carts
            .find_by_user(user)
            .await?
            .ok_or(CoreError::EmptyCart)?;
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        // Validate-then-commit: the full pre-pass runs before any
        // mutation so an invalid cart aborts with no side effects.
        for line in &cart.lines {
            let item = self
                .items
                .find(line.item)
                .await?
                .ok_or(CoreError::ItemNotFound(line.item))?;
            if line.quantity > item.stock_quantity {
                return Err(CoreError::StockExceeded {
                    requested: line.quantity,
                    available: item.stock_quantity,
                });
            }
        }

        let mut total = Decimal::ZERO;
        let mut order_lines = Vec::with_capacity(cart.lines.len());
        let mut touched = Vec::with_capacity(cart.lines.len());
        for line in &cart.lines {
            let item = self
                .items
                .decrement_stock(line.item, line.quantity)
                .await?
                .ok_or(CoreError::ItemNotFound(line.item))?;
            total += item.price * Decimal::from(line.quantity);
            order_lines.push(OrderLine {
                item: item.id,
                quantity: line.quantity,
            });
            touched.push((item.id, item.category));
        }

        // Tracking ids are assumed unique at generation; the order
        // store's uniqueness check is the only collision guard.
        let order = Order::new(
            user,
            order_lines,
            total,
            TrackingId::generate(self.tracking_id_len),
        )
        .with_status(OrderStatus::Processing)
        .with_payment(PaymentStatus::Paid);

        let order = self.orders.insert(order).await?;
        self.carts.delete_by_user(user).await?;

        self.cache.invalidate(&CacheKey::OrdersByUser(user)).await;
        self.cache.invalidate(&CacheKey::AllItems).await;
        for (item, category) in touched {
            self.cache.invalidate(&CacheKey::Item(item)).await;
            self.cache
                .invalidate(&CacheKey::ItemsByCategory(category))
                .await;
        }

        info!(
            user = %user,
            order = %order.id,
            tracking = %order.tracking_id,
            total = %order.total_amount,
            "checkout completed"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodega_cache::MokaBackend;
    use bodega_model::{CategoryId, Item, ItemDraft, ItemId};
    use bodega_store::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct Fixture {
        store: Arc<MemoryStore>,
        engine: CheckoutEngine,
        cart: crate::cart::CartService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let cache = ReadCache::new(Arc::new(MokaBackend::new(64)), Duration::from_secs(600));
        Fixture {
            store: store.clone(),
            engine: CheckoutEngine::new(
                store.clone(),
                store.clone(),
                store.clone(),
                cache,
                12,
            ),
            cart: crate::cart::CartService::new(store.clone(), store),
        }
    }

    impl Fixture {
        async fn item(&self, price: u32, stock: u32) -> Item {
            let items: &dyn ItemStore = self.store.as_ref();
            items
                .insert(
                    ItemDraft::new("Apples", CategoryId::new(), Decimal::from(price))
                        .with_stock(stock),
                )
                .await
                .unwrap()
        }

        async fn stock_of(&self, id: ItemId) -> u32 {
            let items: &dyn ItemStore = self.store.as_ref();
            items.find(id).await.unwrap().unwrap().stock_quantity
        }
    }

    #[tokio::test]
    async fn checkout_without_cart_is_empty_cart() {
        let fx = fixture();
        let err = fx.engine.checkout(UserId::new()).await.unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
        assert_eq!(fx.store.order_count(), 0);
    }

    #[tokio::test]
    async fn checkout_with_lineless_cart_is_empty_cart() {
        let fx = fixture();
        let user = UserId::new();
        let item = fx.item(10, 5).await;

        fx.cart.add_item(user, item.id, 1).await.unwrap();
        fx.cart.remove_item(user, item.id).await.unwrap();

        let err = fx.engine.checkout(user).await.unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
        assert_eq!(fx.store.order_count(), 0);
    }

    #[tokio::test]
    async fn successful_checkout_snapshot() {
        // The worked example: stock 5 at price 10, cart holds 3.
        let fx = fixture();
        let user = UserId::new();
        let item = fx.item(10, 5).await;

        fx.cart.add_item(user, item.id, 3).await.unwrap();
        let order = fx.engine.checkout(user).await.unwrap();

        assert_eq!(order.total_amount, Decimal::from(30));
        assert_eq!(order.order_status, OrderStatus::Processing);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].quantity, 3);
        assert_eq!(order.tracking_id.as_str().len(), 12);

        // Stock consumed exactly once, cart gone, one order persisted
        assert_eq!(fx.stock_of(item.id).await, 2);
        assert!(fx.cart.get_cart(user).await.unwrap().is_none());
        assert_eq!(fx.store.order_count(), 1);
    }

    #[tokio::test]
    async fn prevalidation_failure_leaves_everything_unchanged() {
        let fx = fixture();
        let user = UserId::new();
        let item = fx.item(10, 5).await;

        fx.cart.add_item(user, item.id, 4).await.unwrap();

        // Stock shrank between add and checkout
        let items: &dyn ItemStore = fx.store.as_ref();
        items.decrement_stock(item.id, 3).await.unwrap();

        let err = fx.engine.checkout(user).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::StockExceeded {
                requested: 4,
                available: 2,
            }
        ));

        // No partial decrement, no order, cart still there
        assert_eq!(fx.stock_of(item.id).await, 2);
        assert_eq!(fx.store.order_count(), 0);
        assert!(fx.cart.get_cart(user).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleted_item_fails_prevalidation() {
        let fx = fixture();
        let user = UserId::new();
        let item = fx.item(10, 5).await;

        fx.cart.add_item(user, item.id, 1).await.unwrap();
        let items: &dyn ItemStore = fx.store.as_ref();
        items.delete(item.id).await.unwrap();

        let err = fx.engine.checkout(user).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(fx.store.order_count(), 0);
    }

    #[tokio::test]
    async fn multi_line_totals_and_decrements() {
        let fx = fixture();
        let user = UserId::new();
        let items: &dyn ItemStore = fx.store.as_ref();
        let category = CategoryId::new();
        let apples = items
            .insert(ItemDraft::new("Apples", category, Decimal::from(10)).with_stock(5))
            .await
            .unwrap();
        let pears = items
            .insert(ItemDraft::new("Pears", category, Decimal::from(7)).with_stock(4))
            .await
            .unwrap();

        fx.cart.add_item(user, apples.id, 2).await.unwrap();
        fx.cart.add_item(user, pears.id, 3).await.unwrap();

        let order = fx.engine.checkout(user).await.unwrap();
        assert_eq!(order.total_amount, Decimal::from(41));
        assert_eq!(order.lines.len(), 2);
        assert_eq!(fx.stock_of(apples.id).await, 3);
        assert_eq!(fx.stock_of(pears.id).await, 1);
    }

    #[tokio::test]
    async fn sequential_checkouts_get_distinct_tracking_ids() {
        let fx = fixture();
        let item = fx.item(10, 10).await;

        let first_user = UserId::new();
        let second_user = UserId::new();
        fx.cart.add_item(first_user, item.id, 1).await.unwrap();
        fx.cart.add_item(second_user, item.id, 1).await.unwrap();

        let first = fx.engine.checkout(first_user).await.unwrap();
        let second = fx.engine.checkout(second_user).await.unwrap();

        assert_ne!(first.tracking_id, second.tracking_id);
        assert_eq!(fx.store.order_count(), 2);
    }

    #[tokio::test]
    async fn second_checkout_of_contended_stock_fails_cleanly() {
        let fx = fixture();
        let item = fx.item(10, 5).await;

        let first_user = UserId::new();
        let second_user = UserId::new();
        fx.cart.add_item(first_user, item.id, 3).await.unwrap();
        fx.cart.add_item(second_user, item.id, 3).await.unwrap();

        fx.engine.checkout(first_user).await.unwrap();
        let err = fx.engine.checkout(second_user).await.unwrap_err();

        assert!(matches!(
            err,
            CoreError::StockExceeded {
                requested: 3,
                available: 2,
            }
        ));
        assert_eq!(fx.stock_of(item.id).await, 2);
        assert_eq!(fx.store.order_count(), 1);
        // The losing cart is preserved for the user to adjust
        assert!(fx.cart.get_cart(second_user).await.unwrap().is_some());
    }
}
