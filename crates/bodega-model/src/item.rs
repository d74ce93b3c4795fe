//! Catalog items
//!
//! An [`Item`] is the unit of sale: it carries the authoritative price and
//! stock quantity. Stock is only ever mutated by admin item management and
//! by the checkout engine's conditional decrement.

use crate::ids::{CategoryId, ItemId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog item as persisted in the item store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Owning category (referenced, not owned)
    pub category: CategoryId,
    /// Unit price, non-negative
    pub price: Decimal,
    /// Units currently in stock, never negative
    pub stock_quantity: u32,
    /// Whether the item is offered for sale
    pub is_available: bool,
    /// Optional long description
    pub description: Option<String>,
    /// Image references
    pub images: Vec<String>,
    /// Creation timestamp (set by the store)
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp (refreshed by the store)
    pub updated_at: DateTime<Utc>,
}

/// Input shape for creating an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Display name, required non-empty
    pub name: String,
    /// Owning category
    pub category: CategoryId,
    /// Unit price, required non-negative
    pub price: Decimal,
    /// Initial stock level
    pub stock_quantity: u32,
    /// Offered for sale; defaults to true
    pub is_available: bool,
    /// Optional long description
    pub description: Option<String>,
    /// Image references
    pub images: Vec<String>,
}

impl ItemDraft {
    /// Create a draft with the required fields
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, category: CategoryId, price: Decimal) -> Self {
        Self {
            name: name.into(),
            category,
            price,
            stock_quantity: 0,
            is_available: true,
            description: None,
            images: Vec::new(),
        }
    }

    /// With an initial stock level
    #[inline]
    #[must_use]
    pub fn with_stock(mut self, quantity: u32) -> Self {
        self.stock_quantity = quantity;
        self
    }

    /// With a description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With image references
    #[inline]
    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

/// Partial update for an item; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    /// New display name
    pub name: Option<String>,
    /// New owning category
    pub category: Option<CategoryId>,
    /// New unit price
    pub price: Option<Decimal>,
    /// New stock level (admin restock/correction)
    pub stock_quantity: Option<u32>,
    /// New availability flag
    pub is_available: Option<bool>,
    /// New description
    pub description: Option<String>,
    /// New image references
    pub images: Option<Vec<String>>,
}

impl ItemPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price
    #[inline]
    #[must_use]
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the stock level
    #[inline]
    #[must_use]
    pub fn stock(mut self, quantity: u32) -> Self {
        self.stock_quantity = Some(quantity);
        self
    }

    /// Set the category
    #[inline]
    #[must_use]
    pub fn category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the name
    #[inline]
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// True if no field is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
            && self.is_available.is_none()
            && self.description.is_none()
            && self.images.is_none()
    }
}
