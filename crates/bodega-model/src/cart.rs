//! Shopping carts
//!
//! At most one [`Cart`] exists per user. Carts are created lazily on the
//! first add and destroyed on checkout or an explicit clear.

use crate::ids::{CartId, ItemId, UserId};
use crate::item::Item;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One requested item inside a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Referenced catalog item
    pub item: ItemId,
    /// Requested quantity, always >= 1
    pub quantity: u32,
}

/// A user's in-progress order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Store-assigned identifier
    pub id: CartId,
    /// Owning user; unique across carts
    pub user: UserId,
    /// Requested lines, in insertion order
    pub lines: Vec<CartLine>,
    /// Creation timestamp (set by the store)
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp (refreshed by the store)
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart for a user
    #[inline]
    #[must_use]
    pub fn new(user: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: CartId::new(),
            user,
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Find the line for an item, if present
    #[inline]
    #[must_use]
    pub fn line(&self, item: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item == item)
    }

    /// Quantity currently requested for an item (0 when absent)
    #[inline]
    #[must_use]
    pub fn quantity_of(&self, item: ItemId) -> u32 {
        self.line(item).map_or(0, |l| l.quantity)
    }

    /// True when the cart has no lines
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A cart line with its item populated for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineView {
    /// The referenced item, absent when it was deleted after being added
    pub item: Option<Item>,
    /// Requested quantity
    pub quantity: u32,
}

/// A cart with item details populated for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    /// Cart identifier
    pub id: CartId,
    /// Owning user
    pub user: UserId,
    /// Populated lines
    pub lines: Vec<CartLineView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(UserId::new());
        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(ItemId::new()), 0);
    }

    #[test]
    fn line_lookup() {
        let mut cart = Cart::new(UserId::new());
        let item = ItemId::new();
        cart.lines.push(CartLine { item, quantity: 3 });

        assert_eq!(cart.quantity_of(item), 3);
        assert!(cart.line(ItemId::new()).is_none());
    }
}
