//! Entity identifiers
//!
//! Each persisted entity gets its own uuid-backed newtype so that an
//! `ItemId` can never be passed where an `OrderId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a catalog item
    ItemId
);
entity_id!(
    /// Identifier of a catalog category
    CategoryId
);
entity_id!(
    /// Identifier of a registered user (owned by the auth collaborator)
    UserId
);
entity_id!(
    /// Identifier of a shopping cart
    CartId
);
entity_id!(
    /// Identifier of a placed order
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(ItemId::new(), ItemId::new());
        assert_ne!(OrderId::new(), OrderId::new());
    }

    #[test]
    fn id_display_roundtrip() {
        let id = UserId::new();
        let parsed = UserId(id.to_string().parse().unwrap());
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = CategoryId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
