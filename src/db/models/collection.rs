//! Collection Model
//!
//! A node in the category hierarchy. `parent = None` means top-level;
//! nesting depth is unbounded. The parent graph must stay acyclic —
//! the repository rejects parent assignments that would close a loop.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers::{self, default_true};

pub type CollectionId = RecordId;

/// Collection model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CollectionId>,
    pub name: String,
    /// URL-safe identifier, unique among live collections
    pub slug: String,
    /// Record link to the parent collection, None for top-level
    #[serde(default)]
    pub parent: Option<RecordId>,
    /// Ascending sort key among siblings; ties broken by created_at
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_archived: bool,
    /// Opaque display asset URL
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Unix millis, set by the write path
    #[serde(default)]
    pub created_at: i64,
}

impl Collection {
    /// Visibility filter applied before a node is eligible for browsing
    pub fn is_browsable(&self) -> bool {
        self.is_active && !self.is_archived
    }

    /// Record id in its "collection:xxx" string form
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    /// Parent id in its string form, if any
    pub fn parent_string(&self) -> Option<String> {
        self.parent.as_ref().map(|id| id.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionCreate {
    pub name: String,
    /// Explicit slug; derived from `name` when absent
    pub slug: Option<String>,
    /// Parent collection id ("collection:xxx" or bare id)
    pub parent: Option<String>,
    pub sort_order: Option<i32>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Reassign the parent; cycle-guarded by the repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}
