//! Bodega Model - persisted entity types
//!
//! The shapes shared by every layer of the commerce core:
//! - Catalog items and categories
//! - Per-user shopping carts
//! - Placed orders with their status labels
//! - Typed identifiers and tracking ids
//!
//! All types are plain data with serde derives; ownership rules and
//! invariants (stock never negative, one cart per user, unique tracking
//! ids) are enforced by the store and core layers.

#![warn(unreachable_pub)]

pub mod cart;
pub mod category;
pub mod ids;
pub mod item;
pub mod order;
pub mod tracking;

// Re-exports for convenience
pub use cart::{Cart, CartLine, CartLineView, CartView};
pub use category::{Category, CategoryDraft, CategoryPatch};
pub use ids::{CartId, CategoryId, ItemId, OrderId, UserId};
pub use item::{Item, ItemDraft, ItemPatch};
pub use order::{Order, OrderLine, OrderLineView, OrderStatus, OrderView, PaymentStatus};
pub use tracking::{TrackingId, DEFAULT_TRACKING_ID_LEN};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
