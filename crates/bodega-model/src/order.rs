//! Orders
//!
//! An [`Order`] is a frozen snapshot of a cart at checkout time: its lines
//! and total never change afterwards. Only the two status labels are
//! mutable post-creation.

use crate::ids::{ItemId, OrderId, UserId};
use crate::item::Item;
use crate::tracking::TrackingId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fulfilment status of an order
///
/// Treated as an open label set: any status may move to any other. There
/// is deliberately no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order received, not yet picked
    Pending,
    /// Being prepared
    Processing,
    /// Handed to the carrier
    Shipped,
    /// Arrived at the customer
    Delivered,
    /// Cancelled by either side
    Cancelled,
}

/// Payment status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Awaiting payment
    Pending,
    /// Payment captured
    Paid,
    /// Payment attempt failed
    Failed,
}

/// One purchased line, snapshotted from the cart at checkout time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Purchased catalog item
    pub item: ItemId,
    /// Purchased quantity
    pub quantity: u32,
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier
    pub id: OrderId,
    /// Owning user
    pub user: UserId,
    /// Purchased lines (immutable snapshot)
    pub lines: Vec<OrderLine>,
    /// Sum of price x quantity at checkout time
    pub total_amount: Decimal,
    /// Fulfilment status
    pub order_status: OrderStatus,
    /// Payment status
    pub payment_status: PaymentStatus,
    /// Externally shareable locator, unique across orders
    pub tracking_id: TrackingId,
    /// Creation timestamp (set by the store)
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp (refreshed by the store)
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create an order in the default Pending/Pending state
    #[inline]
    #[must_use]
    pub fn new(
        user: UserId,
        lines: Vec<OrderLine>,
        total_amount: Decimal,
        tracking_id: TrackingId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            user,
            lines,
            total_amount,
            order_status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            tracking_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// With a fulfilment status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.order_status = status;
        self
    }

    /// With a payment status
    #[inline]
    #[must_use]
    pub fn with_payment(mut self, status: PaymentStatus) -> Self {
        self.payment_status = status;
        self
    }
}

/// An order line with its item populated for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineView {
    /// The purchased item, absent when it was deleted after the sale
    pub item: Option<Item>,
    /// Purchased quantity
    pub quantity: u32,
}

/// An order with item details populated for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    /// Order identifier
    pub id: OrderId,
    /// Owning user
    pub user: UserId,
    /// Populated lines
    pub lines: Vec<OrderLineView>,
    /// Snapshotted total
    pub total_amount: Decimal,
    /// Fulfilment status
    pub order_status: OrderStatus,
    /// Payment status
    pub payment_status: PaymentStatus,
    /// Tracking identifier
    pub tracking_id: TrackingId,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_defaults_to_pending() {
        let order = Order::new(
            UserId::new(),
            vec![],
            Decimal::ZERO,
            TrackingId::generate(12),
        );
        assert_eq!(order.order_status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn order_status_builders() {
        let order = Order::new(
            UserId::new(),
            vec![],
            Decimal::ZERO,
            TrackingId::generate(12),
        )
        .with_status(OrderStatus::Processing)
        .with_payment(PaymentStatus::Paid);

        assert_eq!(order.order_status, OrderStatus::Processing);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn status_serde_labels() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"Shipped\"");
        let json = serde_json::to_string(&PaymentStatus::Paid).unwrap();
        assert_eq!(json, "\"Paid\"");
    }
}
