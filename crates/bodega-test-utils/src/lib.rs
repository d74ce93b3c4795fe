//! Testing utilities for the bodega workspace
//!
//! Seeded fixtures and instrumented store/cache doubles shared by the
//! service and integration tests.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use bodega_cache::{CacheBackend, CacheError};
use bodega_model::{
    Category, CategoryDraft, CategoryId, Item, ItemDraft, ItemId, ItemPatch,
};
use bodega_store::{CategoryStore, ItemStore, MemoryStore, StoreError};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

static LOGGING: Once = Once::new();

/// Install a subscriber honouring `RUST_LOG` once per test binary
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// A store seeded with one category and one stocked item
pub struct SeededCatalog {
    pub store: Arc<MemoryStore>,
    pub category: Category,
    pub item: Item,
}

/// Seed a store with a "Groceries" category and one item at the given
/// price and stock
pub async fn seeded_catalog(price: u32, stock: u32) -> SeededCatalog {
    let store = Arc::new(MemoryStore::new());
    let categories: &dyn CategoryStore = store.as_ref();
    let category = categories
        .insert(CategoryDraft::new("Groceries"))
        .await
        .unwrap();
    let items: &dyn ItemStore = store.as_ref();
    let item = items
        .insert(
            ItemDraft::new("Basmati rice", category.id, Decimal::from(price)).with_stock(stock),
        )
        .await
        .unwrap();
    SeededCatalog {
        store,
        category,
        item,
    }
}

/// Item store wrapper that counts reads, to prove a cache hit skipped
/// the backing store
pub struct CountingItemStore {
    inner: Arc<dyn ItemStore>,
    finds: AtomicUsize,
    lists: AtomicUsize,
}

impl CountingItemStore {
    pub fn new(inner: Arc<dyn ItemStore>) -> Self {
        Self {
            inner,
            finds: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
        }
    }

    pub fn find_count(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn list_count(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemStore for CountingItemStore {
    async fn find(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find(id).await
    }

    async fn list(&self, category: Option<CategoryId>) -> Result<Vec<Item>, StoreError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list(category).await
    }

    async fn insert(&self, draft: ItemDraft) -> Result<Item, StoreError> {
        self.inner.insert(draft).await
    }

    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, StoreError> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        self.inner.delete(id).await
    }

    async fn decrement_stock(
        &self,
        id: ItemId,
        quantity: u32,
    ) -> Result<Option<Item>, StoreError> {
        self.inner.decrement_stock(id, quantity).await
    }
}

/// Item store wrapper whose `decrement_stock` fails for one designated
/// item, for exercising mid-commit checkout failures
pub struct FailingDecrementStore {
    inner: Arc<dyn ItemStore>,
    poisoned: ItemId,
}

impl FailingDecrementStore {
    pub fn new(inner: Arc<dyn ItemStore>, poisoned: ItemId) -> Self {
        Self { inner, poisoned }
    }
}

#[async_trait]
impl ItemStore for FailingDecrementStore {
    async fn find(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        self.inner.find(id).await
    }

    async fn list(&self, category: Option<CategoryId>) -> Result<Vec<Item>, StoreError> {
        self.inner.list(category).await
    }

    async fn insert(&self, draft: ItemDraft) -> Result<Item, StoreError> {
        self.inner.insert(draft).await
    }

    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, StoreError> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        self.inner.delete(id).await
    }

    async fn decrement_stock(
        &self,
        id: ItemId,
        quantity: u32,
    ) -> Result<Option<Item>, StoreError> {
        if id == self.poisoned {
            return Err(StoreError::Unavailable("injected decrement failure".into()));
        }
        self.inner.decrement_stock(id, quantity).await
    }
}

/// Cache backend that fails every call, for exercising the best-effort
/// degradation path
#[derive(Debug, Default)]
pub struct BrokenCacheBackend;

#[async_trait]
impl CacheBackend for BrokenCacheBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }
}
