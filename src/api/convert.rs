//! Type conversion module
//!
//! Maps database models (`db::models`) to API response models with
//! string record ids.

use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::RecordId;

use crate::catalog::{CollectionNode, CollectionWithChildren};
use crate::db::models::{BusinessType, Collection, Product, ProductImage};

// ============ Helpers ============

pub fn record_id_to_string(id: &RecordId) -> String {
    id.to_string()
}

pub fn option_record_id_to_string(id: &Option<RecordId>) -> Option<String> {
    id.as_ref().map(record_id_to_string)
}

// ============ Collection ============

#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    pub parent: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub is_archived: bool,
    pub cover_image: Option<String>,
    pub created_at: i64,
}

impl From<Collection> for CollectionResponse {
    fn from(c: Collection) -> Self {
        Self {
            id: option_record_id_to_string(&c.id),
            parent: c.parent.as_ref().map(record_id_to_string),
            name: c.name,
            slug: c.slug,
            sort_order: c.sort_order,
            is_active: c.is_active,
            is_archived: c.is_archived,
            cover_image: c.cover_image,
            created_at: c.created_at,
        }
    }
}

/// Nested navigation tree node
#[derive(Debug, Clone, Serialize)]
pub struct CollectionTreeResponse {
    #[serde(flatten)]
    pub collection: CollectionResponse,
    pub children: Vec<CollectionTreeResponse>,
}

impl From<CollectionNode> for CollectionTreeResponse {
    fn from(node: CollectionNode) -> Self {
        Self {
            collection: node.collection.into(),
            children: node.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Category landing page payload: the collection plus one level of
/// subcategories.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionWithChildrenResponse {
    #[serde(flatten)]
    pub collection: CollectionResponse,
    pub children: Vec<CollectionResponse>,
}

impl From<CollectionWithChildren> for CollectionWithChildrenResponse {
    fn from(c: CollectionWithChildren) -> Self {
        Self {
            collection: c.collection.into(),
            children: c.children.into_iter().map(Into::into).collect(),
        }
    }
}

// ============ Product ============

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub collection: String,
    pub business_type: BusinessType,
    pub images: Vec<ProductImage>,
    pub available_sizes: Vec<String>,
    pub in_stock: bool,
    pub inspiration_image: Option<String>,
    pub customization_notes: Option<String>,
    pub is_active: bool,
    pub is_archived: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub tags: Vec<String>,
    pub created_at: i64,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: option_record_id_to_string(&p.id),
            collection: record_id_to_string(&p.collection),
            name: p.name,
            description: p.description,
            price: p.price,
            business_type: p.business_type,
            images: p.images,
            available_sizes: p.available_sizes,
            in_stock: p.in_stock,
            inspiration_image: p.inspiration_image,
            customization_notes: p.customization_notes,
            is_active: p.is_active,
            is_archived: p.is_archived,
            is_featured: p.is_featured,
            sort_order: p.sort_order,
            tags: p.tags,
            created_at: p.created_at,
        }
    }
}

pub fn products_to_responses(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(Into::into).collect()
}
