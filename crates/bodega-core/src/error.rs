//! Error types for the commerce core
//!
//! Every operation surfaces one of these to the controller layer, which
//! maps them to HTTP status codes. Authorization failures belong to the
//! auth collaborator and never appear here.

use bodega_model::{CategoryId, ItemId, OrderId, TrackingId, UserId};
use bodega_store::StoreError;

/// Main commerce error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Item absent from the catalog
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// Category absent from the catalog
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Order absent
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// No order carries this tracking id
    #[error("no order with tracking id: {0}")]
    TrackingIdNotFound(TrackingId),

    /// User has no cart
    #[error("no cart for user: {0}")]
    CartNotFound(UserId),

    /// Requested or cumulative quantity exceeds live stock
    #[error("requested quantity ({requested}) exceeds available stock ({available})")]
    StockExceeded {
        /// Quantity the caller asked for (cumulative for merged lines)
        requested: u32,
        /// Live stock at the time of the check
        available: u32,
    },

    /// Checkout attempted with no cart or an empty one
    #[error("cart is empty")]
    EmptyCart,

    /// Missing or malformed input fields
    #[error("validation failed: {0}")]
    Validation(String),

    /// Store-level failure (conflicts, backend unavailable)
    #[error(transparent)]
    Store(StoreError),
}

impl CoreError {
    /// True for absent-record errors (maps to 404)
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ItemNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::OrderNotFound(_)
                | Self::TrackingIdNotFound(_)
                | Self::CartNotFound(_)
        )
    }

    /// True for uniqueness conflicts (maps to 409)
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_conflict())
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            // The guarded decrement losing its race is the same condition
            // the pre-validation pass reports.
            StoreError::InsufficientStock {
                requested,
                available,
                ..
            } => Self::StockExceeded {
                requested,
                available,
            },
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_predicate() {
        assert!(CoreError::ItemNotFound(ItemId::new()).is_not_found());
        assert!(CoreError::CartNotFound(UserId::new()).is_not_found());
        assert!(
            CoreError::TrackingIdNotFound(bodega_model::TrackingId::generate(12)).is_not_found()
        );
        assert!(!CoreError::EmptyCart.is_not_found());
    }

    #[test]
    fn insufficient_stock_maps_to_stock_exceeded() {
        let err = CoreError::from(StoreError::InsufficientStock {
            item: ItemId::new(),
            requested: 6,
            available: 5,
        });
        assert!(matches!(
            err,
            CoreError::StockExceeded {
                requested: 6,
                available: 5,
            }
        ));
    }

    #[test]
    fn conflict_predicate() {
        let err = CoreError::from(StoreError::DuplicateName("Dairy".into()));
        assert!(err.is_conflict());
        assert!(!CoreError::EmptyCart.is_conflict());
    }
}
