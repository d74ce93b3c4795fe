//! Bodega Store - document persistence
//!
//! The storage boundary of the commerce core:
//! - Object-safe traits for items, categories, carts, and orders
//! - A DashMap-backed in-memory backend with document-level atomicity
//! - The guarded stock decrement that keeps checkout from overselling
//!
//! The store is the single source of truth; the cache layer is always
//! derived and disposable.

#![warn(unreachable_pub)]

pub mod error;
pub mod memory;
pub mod traits;

// Re-exports for convenience
pub use error::StoreError;
pub use memory::MemoryStore;
pub use traits::{CartStore, CategoryStore, ItemStore, OrderStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
