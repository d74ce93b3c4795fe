//! Cart service
//!
//! One cart per user, created lazily on the first add. The stock check at
//! add time is advisory only: stock is read, not reserved, so concurrent
//! adds can jointly overcommit. Checkout re-validates against live stock
//! and is where the guarded decrement actually protects inventory.

use crate::error::CoreError;
use bodega_model::{Cart, CartLine, CartLineView, CartView, ItemId, UserId};
use bodega_store::{CartStore, ItemStore};
use std::sync::Arc;
use tracing::debug;

/// Per-user cart management
pub struct CartService {
    items: Arc<dyn ItemStore>,
    carts: Arc<dyn CartStore>,
}

impl CartService {
    /// Wire the service to its stores
    #[inline]
    #[must_use]
    pub fn new(items: Arc<dyn ItemStore>, carts: Arc<dyn CartStore>) -> Self {
        Self { items, carts }
    }

    /// The user's cart with item details populated, or `None`
    pub async fn get_cart(&self, user: UserId) -> Result<Option<CartView>, CoreError> {
        let Some(cart) = self.carts.find_by_user(user).await? else {
            return Ok(None);
        };

        let mut lines = Vec::with_capacity(cart.lines.len());
        for line in &cart.lines {
            lines.push(CartLineView {
                item: self.items.find(line.item).await?,
                quantity: line.quantity,
            });
        }

        Ok(Some(CartView {
            id: cart.id,
            user: cart.user,
            lines,
        }))
    }

    /// Add an item to the cart, merging into an existing line
    ///
    /// # Errors
    /// - `Validation` when `quantity` is zero
    /// - `ItemNotFound` when the item is absent
    /// - `StockExceeded` when the requested quantity, or the merged line
    ///   total, exceeds live stock
    pub async fn add_item(
        &self,
        user: UserId,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<Cart, CoreError> {
        if quantity == 0 {
            return Err(CoreError::Validation("quantity must be at least 1".into()));
        }

        let item = self
            .items
            .find(item_id)
            .await?
            .ok_or(CoreError::ItemNotFound(item_id))?;

        if quantity > item.stock_quantity {
            return Err(CoreError::StockExceeded {
                requested: quantity,
                available: item.stock_quantity,
            });
        }

        let mut cart = self
            .carts
            .find_by_user(user)
            .await?
            .unwrap_or_else(|| Cart::new(user));

        if let Some(line) = cart.lines.iter_mut().find(|l| l.item == item_id) {
            // Saturation keeps an absurd merged quantity on the
            // StockExceeded path instead of wrapping
            let merged = line.quantity.saturating_add(quantity);
            if merged > item.stock_quantity {
                return Err(CoreError::StockExceeded {
                    requested: merged,
                    available: item.stock_quantity,
                });
            }
            line.quantity = merged;
        } else {
            cart.lines.push(CartLine {
                item: item_id,
                quantity,
            });
        }

        let cart = self.carts.upsert(cart).await?;
        debug!(user = %user, item = %item_id, quantity, "cart line added");
        Ok(cart)
    }

    /// Remove an item's line from the cart
    ///
    /// Absent cart or line is a no-op, never an error; callers decide
    /// whether `None` means "not found".
    pub async fn remove_item(
        &self,
        user: UserId,
        item_id: ItemId,
    ) -> Result<Option<Cart>, CoreError> {
        let Some(mut cart) = self.carts.find_by_user(user).await? else {
            return Ok(None);
        };

        let before = cart.lines.len();
        cart.lines.retain(|line| line.item != item_id);
        if cart.lines.len() == before {
            // Nothing matched; leave the document (and its timestamps) alone
            return Ok(Some(cart));
        }
        let cart = self.carts.upsert(cart).await?;
        debug!(user = %user, item = %item_id, "cart line removed");
        Ok(Some(cart))
    }

    /// Delete the cart document entirely
    pub async fn clear(&self, user: UserId) -> Result<(), CoreError> {
        self.carts.delete_by_user(user).await?;
        debug!(user = %user, "cart cleared");
        Ok(())
    }
}
