//! Product Repository

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_record_id, strip_table_prefix};
use crate::db::models::{BusinessType, Product, ProductCreate, ProductImage, ProductUpdate};

const TABLE: &str = "product";
const COLLECTION_TABLE: &str = "collection";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Every browsable product across the whole store.
    ///
    /// The store-side ORDER BY is an optimization only; the catalog
    /// aggregator re-derives the total order in memory.
    pub async fn find_active_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE is_active = true AND is_archived != true \
                 ORDER BY sort_order, created_at DESC",
            )
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Browsable products whose owning collection is in `ids`
    /// (the expanded descendant set of a scope).
    pub async fn find_active_in(&self, ids: Vec<RecordId>) -> RepoResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE collection IN $ids AND is_active = true \
                 AND is_archived != true ORDER BY sort_order, created_at DESC",
            )
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Browsable products directly owned by one collection
    /// (no descendant expansion; used for "related" strips).
    pub async fn find_by_collection(&self, collection_id: &str) -> RepoResult<Vec<Product>> {
        let collection = make_record_id(COLLECTION_TABLE, collection_id);
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE collection = $collection AND is_active = true \
                 AND is_archived != true ORDER BY sort_order, created_at DESC",
            )
            .bind(("collection", collection))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let product: Option<Product> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.images.is_empty() {
            return Err(RepoError::Validation(
                "Product requires at least one image".to_string(),
            ));
        }

        // The owning collection must exist; products are never orphaned
        // at creation time.
        let collection_id = make_record_id(COLLECTION_TABLE, &data.collection);
        let owner: Option<crate::db::models::Collection> = self
            .base
            .db()
            .select((COLLECTION_TABLE, collection_id.key().to_string()))
            .await?;
        if owner.is_none() {
            return Err(RepoError::NotFound(format!(
                "Collection {} not found",
                data.collection
            )));
        }

        let product = Product {
            id: None,
            name: data.name,
            description: data.description.unwrap_or_default(),
            price: data.price,
            collection: collection_id,
            business_type: data.business_type.unwrap_or_default(),
            images: data.images,
            available_sizes: data.available_sizes,
            in_stock: data.in_stock.unwrap_or(true),
            inspiration_image: data.inspiration_image,
            customization_notes: data.customization_notes,
            is_active: true,
            is_archived: false,
            is_featured: data.is_featured.unwrap_or(false),
            sort_order: data.sort_order.unwrap_or(0),
            tags: data.tags,
            created_at: Utc::now().timestamp_millis(),
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let pure_id = strip_table_prefix(TABLE, id);

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))?;

        if let Some(ref images) = data.images
            && images.is_empty()
        {
            return Err(RepoError::Validation(
                "Product requires at least one image".to_string(),
            ));
        }

        let collection = match data.collection.as_deref() {
            Some(collection_id) => {
                let collection = make_record_id(COLLECTION_TABLE, collection_id);
                let owner: Option<crate::db::models::Collection> = self
                    .base
                    .db()
                    .select((COLLECTION_TABLE, collection.key().to_string()))
                    .await?;
                if owner.is_none() {
                    return Err(RepoError::NotFound(format!(
                        "Collection {collection_id} not found"
                    )));
                }
                Some(collection)
            }
            None => None,
        };

        #[derive(Serialize)]
        struct ProductUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            collection: Option<RecordId>,
            #[serde(skip_serializing_if = "Option::is_none")]
            business_type: Option<BusinessType>,
            #[serde(skip_serializing_if = "Option::is_none")]
            images: Option<Vec<ProductImage>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            available_sizes: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            in_stock: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            inspiration_image: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            customization_notes: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_archived: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_featured: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sort_order: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            tags: Option<Vec<String>>,
        }

        let update_data = ProductUpdateDb {
            name: data.name,
            description: data.description,
            price: data.price,
            collection,
            business_type: data.business_type,
            images: data.images,
            available_sizes: data.available_sizes,
            in_stock: data.in_stock,
            inspiration_image: data.inspiration_image,
            customization_notes: data.customization_notes,
            is_active: data.is_active,
            is_archived: data.is_archived,
            is_featured: data.is_featured,
            sort_order: data.sort_order,
            tags: data.tags,
        };

        let thing = make_record_id(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);

        let existing = self.find_by_id(pure_id).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Product {id} not found")));
        }

        let thing = make_record_id(TABLE, pure_id);
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;

        Ok(true)
    }
}
