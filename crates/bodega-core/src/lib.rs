//! Commerce core: catalog, carts, checkout, and orders
//!
//! The services in this crate sit between a transport layer and the
//! document stores. Reads on hot paths go through a best-effort cache;
//! writes invalidate, never update, cached entries. [`Commerce`] wires
//! the full set over a shared store and cache.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod orders;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use checkout::CheckoutEngine;
pub use config::CoreConfig;
pub use error::CoreError;
pub use orders::OrderService;

use bodega_cache::{MokaBackend, ReadCache};
use bodega_store::{CartStore, CategoryStore, ItemStore, MemoryStore, OrderStore};
use std::sync::Arc;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// All four services wired over one store and one cache
pub struct Commerce {
    /// Item and category management
    pub catalog: CatalogService,
    /// Per-user carts
    pub cart: CartService,
    /// Cart-to-order conversion
    pub checkout: CheckoutEngine,
    /// Order reads and status transitions
    pub orders: OrderService,
}

impl Commerce {
    /// Wire the services over explicit store handles and a cache
    #[must_use]
    pub fn new(
        items: Arc<dyn ItemStore>,
        categories: Arc<dyn CategoryStore>,
        carts: Arc<dyn CartStore>,
        orders: Arc<dyn OrderStore>,
        cache: ReadCache,
        config: &CoreConfig,
    ) -> Self {
        Self {
            catalog: CatalogService::new(items.clone(), categories, cache.clone()),
            cart: CartService::new(items.clone(), carts.clone()),
            checkout: CheckoutEngine::new(
                items.clone(),
                carts,
                orders.clone(),
                cache.clone(),
                config.tracking_id_len,
            ),
            orders: OrderService::new(orders, items, cache),
        }
    }

    /// Everything in memory, sized per the configuration
    #[must_use]
    pub fn in_memory(config: &CoreConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let cache = ReadCache::new(
            Arc::new(MokaBackend::new(config.cache_capacity)),
            config.cache_ttl,
        );
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            cache,
            config,
        )
    }
}
