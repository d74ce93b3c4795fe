//! Core configuration

use bodega_model::DEFAULT_TRACKING_ID_LEN;
use std::time::Duration;

/// Tuning knobs for the commerce core
#[derive(Debug, Clone, Copy)]
pub struct CoreConfig {
    /// TTL for catalog and order-history cache entries
    pub cache_ttl: Duration,
    /// Maximum number of cache entries
    pub cache_capacity: u64,
    /// Length of generated tracking ids
    pub tracking_id_len: usize,
}

impl CoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a cache TTL
    #[inline]
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// With a cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// With a tracking-id length
    #[inline]
    #[must_use]
    pub fn with_tracking_id_len(mut self, len: usize) -> Self {
        self.tracking_id_len = len;
        self
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(600),
            cache_capacity: 10_000,
            tracking_id_len: DEFAULT_TRACKING_ID_LEN,
        }
    }
}
