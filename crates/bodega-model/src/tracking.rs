//! Order tracking identifiers
//!
//! Short random alphanumeric identifiers for locating an order without its
//! internal id. Uniqueness is enforced by the order store on insert; there
//! is no collision-retry loop here.

use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default tracking-id length
pub const DEFAULT_TRACKING_ID_LEN: usize = 12;

/// Externally shareable order locator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingId(String);

impl TrackingId {
    /// Draw a random alphanumeric identifier of the given length
    #[must_use]
    pub fn generate(len: usize) -> Self {
        let id: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        Self(id)
    }

    /// View as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TrackingId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
