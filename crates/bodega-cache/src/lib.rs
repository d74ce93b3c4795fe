//! Bodega Cache - TTL read cache
//!
//! Memoization layer for read-heavy catalog and order-history queries:
//! - A redis-shaped [`CacheBackend`] trait (get, set-with-TTL, delete)
//! - An in-process moka backend with per-entry expiry
//! - A typed [`ReadCache`] wrapper with deterministic [`CacheKey`]s
//!
//! The cache is a side channel, not a source of truth: entries are always
//! derived and disposable, writes invalidate rather than refresh, and any
//! backend failure degrades to store-only reads.

#![warn(unreachable_pub)]

pub mod backend;
pub mod key;
pub mod read_cache;

// Re-exports for convenience
pub use backend::{CacheBackend, CacheError, MokaBackend};
pub use key::CacheKey;
pub use read_cache::ReadCache;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
