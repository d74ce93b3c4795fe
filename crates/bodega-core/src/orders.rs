//! Order service
//!
//! Read and status-update paths over placed orders. History and single-order
//! reads are cache-first; tracking-id lookups go straight to the store since
//! the locator is typed into a courier page once, not polled.

use crate::error::CoreError;
use bodega_cache::{CacheKey, ReadCache};
use bodega_model::{
    Order, OrderId, OrderLineView, OrderStatus, OrderView, PaymentStatus, TrackingId, UserId,
};
use bodega_store::{ItemStore, OrderStore};
use std::sync::Arc;
use tracing::info;

/// Order reads and status transitions
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    items: Arc<dyn ItemStore>,
    cache: ReadCache,
}

impl OrderService {
    /// Wire the service to its stores and cache
    #[inline]
    #[must_use]
    pub fn new(orders: Arc<dyn OrderStore>, items: Arc<dyn ItemStore>, cache: ReadCache) -> Self {
        Self {
            orders,
            items,
            cache,
        }
    }

    /// All of a user's orders, newest first, with items populated
    /// (cache-first)
    pub async fn order_history(&self, user: UserId) -> Result<Vec<OrderView>, CoreError> {
        let key = CacheKey::OrdersByUser(user);
        if let Some(views) = self.cache.fetch::<Vec<OrderView>>(&key).await {
            return Ok(views);
        }

        let orders = self.orders.list_by_user(user).await?;
        let mut views = Vec::with_capacity(orders.len());
        for order in orders {
            views.push(self.populate(order).await?);
        }
        self.cache.store(&key, &views).await;
        Ok(views)
    }

    /// A single order with items populated (cache-first)
    pub async fn get_order(&self, id: OrderId) -> Result<OrderView, CoreError> {
        let key = CacheKey::Order(id);
        if let Some(view) = self.cache.fetch::<OrderView>(&key).await {
            return Ok(view);
        }

        let order = self
            .orders
            .find(id)
            .await?
            .ok_or(CoreError::OrderNotFound(id))?;
        let view = self.populate(order).await?;
        self.cache.store(&key, &view).await;
        Ok(view)
    }

    /// Locate an order by its tracking id (uncached)
    pub async fn get_order_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<OrderView, CoreError> {
        let order = self
            .orders
            .find_by_tracking_id(tracking_id)
            .await?
            .ok_or_else(|| CoreError::TrackingIdNotFound(tracking_id.clone()))?;
        self.populate(order).await
    }

    /// Delete an order
    pub async fn delete_order(&self, id: OrderId) -> Result<Order, CoreError> {
        let order = self
            .orders
            .delete(id)
            .await?
            .ok_or(CoreError::OrderNotFound(id))?;
        self.cache
            .invalidate_all_of(&CacheKey::for_order_write(order.id, order.user))
            .await;
        info!(order = %order.id, "order deleted");
        Ok(order)
    }

    /// Overwrite an order's fulfilment status
    ///
    /// Statuses are an open label set: any value may replace any other.
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, CoreError> {
        let order = self
            .orders
            .update_order_status(id, status)
            .await?
            .ok_or(CoreError::OrderNotFound(id))?;
        self.cache
            .invalidate_all_of(&CacheKey::for_order_write(order.id, order.user))
            .await;
        info!(order = %order.id, status = ?status, "order status updated");
        Ok(order)
    }

    /// Overwrite an order's payment status
    pub async fn update_payment_status(
        &self,
        id: OrderId,
        status: PaymentStatus,
    ) -> Result<Order, CoreError> {
        let order = self
            .orders
            .update_payment_status(id, status)
            .await?
            .ok_or(CoreError::OrderNotFound(id))?;
        self.cache
            .invalidate_all_of(&CacheKey::for_order_write(order.id, order.user))
            .await;
        info!(order = %order.id, status = ?status, "payment status updated");
        Ok(order)
    }

    /// Build the display view, tolerating items deleted after the sale
    async fn populate(&self, order: Order) -> Result<OrderView, CoreError> {
        let mut lines = Vec::with_capacity(order.lines.len());
        for line in &order.lines {
            lines.push(OrderLineView {
                item: self.items.find(line.item).await?,
                quantity: line.quantity,
            });
        }
        Ok(OrderView {
            id: order.id,
            user: order.user,
            lines,
            total_amount: order.total_amount,
            order_status: order.order_status,
            payment_status: order.payment_status,
            tracking_id: order.tracking_id,
            created_at: order.created_at,
        })
    }
}
