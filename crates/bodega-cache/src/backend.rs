//! Cache backends
//!
//! The [`CacheBackend`] trait is the redis-shaped seam (get, set with TTL,
//! delete); [`MokaBackend`] is the in-process implementation built on
//! moka's future cache with a per-entry expiry policy.

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};

/// Failures surfaced by a cache backend
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Backend unreachable or failing
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Key/value store with per-key time-to-live
///
/// Payloads are JSON strings; the typed wrapper lives in
/// [`crate::read_cache::ReadCache`].
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Look up a key; expired entries read as absent
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value under a key for `ttl`
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Drop a key, if present
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

#[derive(Debug, Clone)]
struct Entry {
    payload: String,
    ttl: Duration,
}

/// Honours the TTL requested at set time instead of a cache-wide value
struct PerEntryExpiry;

impl Expiry<String, Entry> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process cache backend built on moka
#[derive(Debug, Clone)]
pub struct MokaBackend {
    inner: Cache<String, Entry>,
}

impl MokaBackend {
    /// Create a backend bounded to `max_capacity` entries
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(PerEntryExpiry)
                .build(),
        }
    }

    /// Approximate number of live entries
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for MokaBackend {
    /// Backend with default capacity (10,000 entries)
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl CacheBackend for MokaBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.inner.get(key).await.map(|entry| entry.payload))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.inner
            .insert(
                key.to_owned(),
                Entry {
                    payload: value,
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.inner.invalidate(key).await;
        Ok(())
    }
}
