//! Cache keys
//!
//! Deterministic keys for every cached read. A write must invalidate each
//! key that could contain the affected record; [`CacheKey::for_item_write`]
//! collects that set for catalog mutations.

use bodega_model::{CategoryId, ItemId, OrderId, UserId};

/// Typed cache key with a deterministic string rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The full item listing
    AllItems,
    /// Item listing restricted to one category
    ItemsByCategory(CategoryId),
    /// A single item
    Item(ItemId),
    /// A single order
    Order(OrderId),
    /// A user's order history
    OrdersByUser(UserId),
}

impl CacheKey {
    /// Keys that could contain an item after a catalog write
    #[must_use]
    pub fn for_item_write(item: ItemId, category: CategoryId) -> Vec<CacheKey> {
        vec![
            CacheKey::Item(item),
            CacheKey::AllItems,
            CacheKey::ItemsByCategory(category),
        ]
    }

    /// Keys that could contain an order after an order write
    #[must_use]
    pub fn for_order_write(order: OrderId, user: UserId) -> Vec<CacheKey> {
        vec![CacheKey::Order(order), CacheKey::OrdersByUser(user)]
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::AllItems => write!(f, "items:all"),
            CacheKey::ItemsByCategory(id) => write!(f, "items:category:{id}"),
            CacheKey::Item(id) => write!(f, "item:{id}"),
            CacheKey::Order(id) => write!(f, "order:{id}"),
            CacheKey::OrdersByUser(id) => write!(f, "orders:user:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_is_deterministic() {
        let item = ItemId::new();
        assert_eq!(
            CacheKey::Item(item).to_string(),
            format!("item:{}", item.0)
        );
        assert_eq!(CacheKey::AllItems.to_string(), "items:all");

        let user = UserId::new();
        assert_eq!(
            CacheKey::OrdersByUser(user).to_string(),
            format!("orders:user:{}", user.0)
        );
    }

    #[test]
    fn item_write_set_covers_listings() {
        let item = ItemId::new();
        let category = CategoryId::new();
        let keys = CacheKey::for_item_write(item, category);

        assert!(keys.contains(&CacheKey::Item(item)));
        assert!(keys.contains(&CacheKey::AllItems));
        assert!(keys.contains(&CacheKey::ItemsByCategory(category)));
    }
}
