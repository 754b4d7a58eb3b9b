//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers::{self, default_true};

pub type ProductId = RecordId;

/// Retail/custom discriminator governing which optional fields are
/// meaningful: `available_sizes`/`in_stock` for retail,
/// `inspiration_image`/`customization_notes` for custom pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    #[default]
    Retail,
    Custom,
}

/// One catalog image: grid thumbnail plus the full-resolution asset
/// used by the zoom view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub thumb_url: String,
    pub full_url: String,
}

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Absent for bespoke pieces priced on request
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Record link to the owning collection (required)
    pub collection: RecordId,
    #[serde(default)]
    pub business_type: BusinessType,
    /// At least one required; enforced at create
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub available_sizes: Vec<String>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub inspiration_image: Option<String>,
    #[serde(default)]
    pub customization_notes: Option<String>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_archived: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_featured: bool,
    /// Sibling sort key within the owning collection
    #[serde(default)]
    pub sort_order: i32,
    /// Display-only labels
    #[serde(default)]
    pub tags: Vec<String>,
    /// Unix millis, set by the write path
    #[serde(default)]
    pub created_at: i64,
}

impl Product {
    pub fn is_browsable(&self) -> bool {
        self.is_active && !self.is_archived
    }

    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    pub fn collection_string(&self) -> String {
        self.collection.to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Option<Decimal>,
    /// Owning collection id ("collection:xxx" or bare id)
    pub collection: String,
    pub business_type: Option<BusinessType>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub available_sizes: Vec<String>,
    pub in_stock: Option<bool>,
    pub inspiration_image: Option<String>,
    pub customization_notes: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Re-home the product to another collection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProductImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_sizes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspiration_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customization_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
