//! Typed read-through cache
//!
//! [`ReadCache`] memoizes JSON-serializable read results under typed keys.
//! The cache is never authoritative: every failure path degrades to "treat
//! as a miss" so a broken backend can slow reads down but never break them,
//! and invalidation after a mutation is best-effort by design.

use crate::backend::CacheBackend;
use crate::key::CacheKey;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Best-effort memoization layer over a [`CacheBackend`]
#[derive(Clone)]
pub struct ReadCache {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
}

impl ReadCache {
    /// Wrap a backend with a fixed entry TTL
    #[inline]
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// Entry TTL used by [`ReadCache::store`]
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fetch and deserialize a cached value
    ///
    /// Backend errors and undecodable payloads both read as a miss; a bad
    /// payload is additionally dropped so the next read repopulates it.
    pub async fn fetch<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let rendered = key.to_string();
        let payload = match self.backend.get(&rendered).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!(key = %rendered, "cache miss");
                return None;
            }
            Err(err) => {
                warn!(key = %rendered, error = %err, "cache read failed, falling back to store");
                return None;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(value) => {
                debug!(key = %rendered, "cache hit");
                Some(value)
            }
            Err(err) => {
                warn!(key = %rendered, error = %err, "cache payload undecodable, dropping");
                self.invalidate(key).await;
                None
            }
        }
    }

    /// Serialize and store a value under a key (best effort)
    pub async fn store<T: Serialize>(&self, key: &CacheKey, value: &T) {
        let rendered = key.to_string();
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(key = %rendered, error = %err, "cache serialize failed, skipping");
                return;
            }
        };
        if let Err(err) = self.backend.set(&rendered, payload, self.ttl).await {
            warn!(key = %rendered, error = %err, "cache write failed, skipping");
        }
    }

    /// Drop a single key (best effort)
    pub async fn invalidate(&self, key: &CacheKey) {
        let rendered = key.to_string();
        if let Err(err) = self.backend.delete(&rendered).await {
            warn!(key = %rendered, error = %err, "cache invalidation failed");
        }
    }

    /// Drop every key in an invalidation set (best effort)
    pub async fn invalidate_all_of(&self, keys: &[CacheKey]) {
        for key in keys {
            self.invalidate(key).await;
        }
    }
}

impl std::fmt::Debug for ReadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadCache").field("ttl", &self.ttl).finish()
    }
}
