//! Catalog categories

use crate::ids::CategoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog category; names are unique across the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier
    pub id: CategoryId,
    /// Unique display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Creation timestamp (set by the store)
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp (refreshed by the store)
    pub updated_at: DateTime<Utc>,
}

/// Input shape for creating a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDraft {
    /// Unique display name, required non-empty
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

impl CategoryDraft {
    /// Create a draft
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// With a description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for a category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
}
