//! Catalog core: tree resolution, slug lookup and product aggregation.
//!
//! [`CatalogService`] is the single entry point the HTTP layer talks
//! to. It holds no cache and no cross-request state: every call fetches
//! a fresh snapshot, expands scope through the tree resolver and
//! re-derives ordering in memory. Collection trees are small (tens of
//! nodes), so the per-request O(n) rebuild is the deliberate tradeoff
//! for never serving stale data after an admin write.

pub mod tree;

pub use tree::{CollectionNode, build_tree, resolve_descendant_ids};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Collection, Product};
use crate::db::repository::{
    CollectionRepository, ProductRepository, RepoResult, make_record_id,
};

/// The unit of product aggregation: the whole store, or one collection
/// implicitly expanded to its descendant set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    All,
    /// Collection record id ("collection:xxx" or bare key)
    Collection(String),
}

/// A resolved collection with its direct children, for category
/// landing pages (breadcrumb + subcategory navigation).
#[derive(Debug, Clone)]
pub struct CollectionWithChildren {
    pub collection: Collection,
    pub children: Vec<Collection>,
}

/// Catalog aggregator over the collection and product stores.
#[derive(Clone)]
pub struct CatalogService {
    collections: CollectionRepository,
    products: ProductRepository,
}

impl CatalogService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            collections: CollectionRepository::new(db.clone()),
            products: ProductRepository::new(db),
        }
    }

    /// Full nested forest of browsable collections, for navigation.
    pub async fn get_tree(&self) -> RepoResult<Vec<CollectionNode>> {
        let snapshot = self.collections.find_active().await?;
        Ok(build_tree(&snapshot, None))
    }

    /// Resolve a URL slug to a collection plus its direct children.
    /// `None` is the expected outcome for dead links, not an error.
    pub async fn get_by_slug(&self, slug: &str) -> RepoResult<Option<CollectionWithChildren>> {
        let Some(collection) = self.collections.find_by_slug(slug).await? else {
            return Ok(None);
        };
        let children = self.collections.find_children(&collection.id_string()).await?;
        Ok(Some(CollectionWithChildren {
            collection,
            children,
        }))
    }

    /// Ordered browsable products in `scope`.
    ///
    /// A collection scope expands to the collection plus all its
    /// descendants; an id that resolves to nothing simply yields an
    /// empty list.
    pub async fn list_products(&self, scope: &Scope) -> RepoResult<Vec<Product>> {
        let mut products = match scope {
            Scope::All => self.products.find_active_all().await?,
            Scope::Collection(id) => {
                let snapshot = self.collections.find_active().await?;
                let ids = resolve_descendant_ids(id, &snapshot);
                let ids = ids
                    .iter()
                    .map(|id| make_record_id("collection", id))
                    .collect();
                self.products.find_active_in(ids).await?
            }
        };
        sort_products(&mut products);
        Ok(products)
    }

    /// Products from the same collection (no descendant expansion),
    /// excluding one product, featured first, truncated to `limit`.
    /// Returns fewer than `limit` when not enough candidates exist.
    pub async fn list_related(
        &self,
        collection_id: &str,
        exclude_product_id: &str,
        limit: usize,
    ) -> RepoResult<Vec<Product>> {
        let exclude = make_record_id("product", exclude_product_id).to_string();
        let mut products = self.products.find_by_collection(collection_id).await?;
        products.retain(|p| p.id_string() != exclude);
        sort_related(&mut products);
        products.truncate(limit);
        Ok(products)
    }

    /// Count of browsable products in the collection's descendant
    /// scope. Display counts only — not a pagination cursor.
    pub async fn count_in_scope(&self, collection_id: &str) -> RepoResult<usize> {
        let products = self
            .list_products(&Scope::Collection(collection_id.to_string()))
            .await?;
        Ok(products.len())
    }
}

/// The one total order every product listing obeys: sort_order asc,
/// then created_at desc (newest first among equal sort keys). Derived
/// in memory so the result never depends on store iteration order.
pub(crate) fn sort_products(products: &mut [Product]) {
    products.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then(b.created_at.cmp(&a.created_at))
    });
}

/// Related strips additionally rank featured products first.
pub(crate) fn sort_related(products: &mut [Product]) {
    products.sort_by(|a, b| {
        b.is_featured
            .cmp(&a.is_featured)
            .then(a.sort_order.cmp(&b.sort_order))
            .then(b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{BusinessType, ProductImage};
    use surrealdb::RecordId;

    fn product(id: &str, sort_order: i32, created_at: i64, featured: bool) -> Product {
        Product {
            id: Some(RecordId::from_table_key("product", id)),
            name: id.to_string(),
            description: String::new(),
            price: None,
            collection: RecordId::from_table_key("collection", "c"),
            business_type: BusinessType::Retail,
            images: vec![ProductImage {
                thumb_url: "t".into(),
                full_url: "f".into(),
            }],
            available_sizes: Vec::new(),
            in_stock: true,
            inspiration_image: None,
            customization_notes: None,
            is_active: true,
            is_archived: false,
            is_featured: featured,
            sort_order,
            tags: Vec::new(),
            created_at,
        }
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn listing_order_is_sort_key_then_newest_first() {
        let mut products = vec![
            product("older-tied", 0, 10, false),
            product("second", 1, 99, false),
            product("newer-tied", 0, 20, false),
        ];
        sort_products(&mut products);
        assert_eq!(names(&products), vec!["newer-tied", "older-tied", "second"]);

        // Ordering law: adjacent pairs obey (order asc, created desc)
        for pair in products.windows(2) {
            let (x, y) = (&pair[0], &pair[1]);
            assert!(
                x.sort_order < y.sort_order
                    || (x.sort_order == y.sort_order && x.created_at >= y.created_at)
            );
        }
    }

    #[test]
    fn related_ranks_featured_first() {
        let mut products = vec![
            product("plain-early", 0, 30, false),
            product("featured-late", 5, 10, true),
            product("plain-late", 1, 20, false),
        ];
        sort_related(&mut products);
        assert_eq!(
            names(&products),
            vec!["featured-late", "plain-early", "plain-late"]
        );
    }

    #[test]
    fn sorting_is_deterministic_for_equal_snapshots() {
        let build = || {
            vec![
                product("a", 0, 10, false),
                product("b", 0, 10, false),
                product("c", 2, 5, true),
            ]
        };
        let mut first = build();
        let mut second = build();
        sort_products(&mut first);
        sort_products(&mut second);
        assert_eq!(names(&first), names(&second));
    }
}
