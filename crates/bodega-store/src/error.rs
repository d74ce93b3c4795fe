//! Store error types
//!
//! Missing documents are `Ok(None)` at this layer, never errors; the
//! variants here are real store-level failures: uniqueness conflicts, the
//! guarded stock decrement losing its race, or the backend being away.

use bodega_model::ItemId;

/// Failures surfaced by the document store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Guarded decrement found less stock than requested
    #[error("insufficient stock for item {item}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Item whose stock was contended
        item: ItemId,
        /// Quantity the caller asked to consume
        requested: u32,
        /// Stock present at the time of the update
        available: u32,
    },

    /// Category name already taken
    #[error("category name already exists: {0}")]
    DuplicateName(String),

    /// Tracking id already assigned to another order
    #[error("tracking id already exists: {0}")]
    DuplicateTrackingId(String),

    /// Backend unreachable or failing
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// True for uniqueness conflicts
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName(_) | Self::DuplicateTrackingId(_)
        )
    }
}
