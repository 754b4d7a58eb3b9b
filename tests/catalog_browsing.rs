//! End-to-end catalog behavior over an in-memory database:
//! descendant scoping, ordering, delete refusal, slug handling and the
//! legacy schema migration.

use std::collections::HashSet;

use atelier_server::catalog::{CatalogService, Scope};
use atelier_server::db::models::{
    CollectionCreate, CollectionUpdate, ProductCreate, ProductImage,
};
use atelier_server::db::repository::{
    CollectionRepository, ProductRepository, RepoError, make_record_id,
};
use atelier_server::db::{DbService, migration};

struct TestCatalog {
    db: DbService,
    collections: CollectionRepository,
    products: ProductRepository,
    catalog: CatalogService,
}

async fn setup() -> TestCatalog {
    let db = DbService::new_memory().await.unwrap();
    TestCatalog {
        collections: CollectionRepository::new(db.db.clone()),
        products: ProductRepository::new(db.db.clone()),
        catalog: CatalogService::new(db.db.clone()),
        db,
    }
}

fn collection(name: &str, parent: Option<&str>, sort_order: i32) -> CollectionCreate {
    CollectionCreate {
        name: name.to_string(),
        slug: None,
        parent: parent.map(str::to_string),
        sort_order: Some(sort_order),
        cover_image: None,
    }
}

fn product(name: &str, collection_id: &str, sort_order: i32) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        description: Some(format!("{name} description")),
        price: Some("59.90".parse().unwrap()),
        collection: collection_id.to_string(),
        business_type: None,
        images: vec![ProductImage {
            thumb_url: format!("/images/{name}-thumb.webp"),
            full_url: format!("/images/{name}.webp"),
        }],
        available_sizes: vec!["S".into(), "M".into()],
        in_stock: Some(true),
        inspiration_image: None,
        customization_notes: None,
        is_featured: None,
        sort_order: Some(sort_order),
        tags: Vec::new(),
    }
}

fn names(products: &[atelier_server::db::models::Product]) -> HashSet<String> {
    products.iter().map(|p| p.name.clone()).collect()
}

#[tokio::test]
async fn scoped_listing_covers_collection_and_descendants() {
    let t = setup().await;

    let outerwear = t.collections.create(collection("Outerwear", None, 0)).await.unwrap();
    let outerwear_id = outerwear.id_string();
    let jackets = t
        .collections
        .create(collection("Jackets", Some(&outerwear_id), 0))
        .await
        .unwrap();
    let jackets_id = jackets.id_string();
    let coats = t
        .collections
        .create(collection("Coats", Some(&outerwear_id), 1))
        .await
        .unwrap();

    t.products.create(product("P1", &jackets_id, 0)).await.unwrap();
    t.products.create(product("P2", &coats.id_string(), 0)).await.unwrap();
    t.products.create(product("P3", &outerwear_id, 0)).await.unwrap();

    // The whole subtree aggregates under the root
    let listed = t
        .catalog
        .list_products(&Scope::Collection(outerwear_id.clone()))
        .await
        .unwrap();
    assert_eq!(names(&listed), HashSet::from(["P1".into(), "P2".into(), "P3".into()]));

    // Ordering law over the returned sequence
    for pair in listed.windows(2) {
        let (x, y) = (&pair[0], &pair[1]);
        assert!(
            x.sort_order < y.sort_order
                || (x.sort_order == y.sort_order && x.created_at >= y.created_at)
        );
    }

    assert_eq!(t.catalog.count_in_scope(&outerwear_id).await.unwrap(), 3);

    // A leaf scope sees only its own products, not siblings'
    let jackets_only = t
        .catalog
        .list_products(&Scope::Collection(jackets_id))
        .await
        .unwrap();
    assert_eq!(names(&jackets_only), HashSet::from(["P1".into()]));
}

#[tokio::test]
async fn all_scope_is_duplicate_free_union_of_roots() {
    let t = setup().await;

    let outerwear = t.collections.create(collection("Outerwear", None, 0)).await.unwrap();
    let knitwear = t.collections.create(collection("Knitwear", None, 1)).await.unwrap();
    let jackets = t
        .collections
        .create(collection("Jackets", Some(&outerwear.id_string()), 0))
        .await
        .unwrap();

    t.products.create(product("A", &outerwear.id_string(), 0)).await.unwrap();
    t.products.create(product("B", &jackets.id_string(), 1)).await.unwrap();
    t.products.create(product("C", &knitwear.id_string(), 2)).await.unwrap();

    let all = t.catalog.list_products(&Scope::All).await.unwrap();
    assert_eq!(all.len(), 3, "no duplicates across the forest");

    let mut union = HashSet::new();
    for root in [&outerwear, &knitwear] {
        let scoped = t
            .catalog
            .list_products(&Scope::Collection(root.id_string()))
            .await
            .unwrap();
        union.extend(names(&scoped));
    }
    assert_eq!(names(&all), union);

    // Idempotence: re-running the same query yields the same sequence
    let again = t.catalog.list_products(&Scope::All).await.unwrap();
    let ids = |v: &[atelier_server::db::models::Product]| {
        v.iter().map(|p| p.id_string()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&all), ids(&again));
}

#[tokio::test]
async fn delete_with_children_is_refused() {
    let t = setup().await;

    let outerwear = t.collections.create(collection("Outerwear", None, 0)).await.unwrap();
    t.collections
        .create(collection("Jackets", Some(&outerwear.id_string()), 0))
        .await
        .unwrap();

    let err = t.collections.delete(&outerwear.id_string()).await.unwrap_err();
    assert!(matches!(err, RepoError::HasChildren(_)));

    // Store unchanged: the collection still resolves
    let still_there = t.collections.find_by_id(&outerwear.id_string()).await.unwrap();
    assert!(still_there.is_some());

    // Childless collections delete fine
    let knitwear = t.collections.create(collection("Knitwear", None, 1)).await.unwrap();
    assert!(t.collections.delete(&knitwear.id_string()).await.unwrap());
}

#[tokio::test]
async fn unresolved_slug_browses_as_empty() {
    let t = setup().await;

    assert!(t.catalog.get_by_slug("nonexistent").await.unwrap().is_none());

    // Browsing a dead scope degrades to "no items", not an error
    let listed = t
        .catalog
        .list_products(&Scope::Collection("collection:nonexistent".into()))
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn slugs_derive_and_deduplicate() {
    let t = setup().await;

    let first = t.collections.create(collection("Winter Coats", None, 0)).await.unwrap();
    assert_eq!(first.slug, "winter-coats");

    let second = t.collections.create(collection("Winter Coats", None, 1)).await.unwrap();
    assert_eq!(second.slug, "winter-coats-2");

    let third = t.collections.create(collection("Winter Coats", None, 2)).await.unwrap();
    assert_eq!(third.slug, "winter-coats-3");

    // Slug lookup attaches direct children only
    let child = t
        .collections
        .create(collection("Parkas", Some(&first.id_string()), 0))
        .await
        .unwrap();
    t.collections
        .create(collection("Long Parkas", Some(&child.id_string()), 0))
        .await
        .unwrap();

    let page = t.catalog.get_by_slug("winter-coats").await.unwrap().unwrap();
    assert_eq!(page.collection.id_string(), first.id_string());
    assert_eq!(page.children.len(), 1);
    assert_eq!(page.children[0].name, "Parkas");
}

#[tokio::test]
async fn parent_reassignment_rejects_cycles() {
    let t = setup().await;

    let a = t.collections.create(collection("A", None, 0)).await.unwrap();
    let b = t
        .collections
        .create(collection("B", Some(&a.id_string()), 0))
        .await
        .unwrap();
    let c = t
        .collections
        .create(collection("C", Some(&b.id_string()), 0))
        .await
        .unwrap();

    // A under its own grandchild closes a loop
    let err = t
        .collections
        .update(
            &a.id_string(),
            CollectionUpdate {
                name: None,
                slug: None,
                parent: Some(c.id_string()),
                sort_order: None,
                is_active: None,
                is_archived: None,
                cover_image: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // A legitimate reparent still works
    let moved = t
        .collections
        .update(
            &c.id_string(),
            CollectionUpdate {
                name: None,
                slug: None,
                parent: Some(a.id_string()),
                sort_order: None,
                is_active: None,
                is_archived: None,
                cover_image: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.parent_string(), Some(a.id_string()));
}

#[tokio::test]
async fn inactive_parent_hides_its_subtree() {
    let t = setup().await;

    let hidden = t.collections.create(collection("Hidden", None, 0)).await.unwrap();
    t.collections
        .create(collection("Visible Child", Some(&hidden.id_string()), 0))
        .await
        .unwrap();
    t.collections
        .update(
            &hidden.id_string(),
            CollectionUpdate {
                name: None,
                slug: None,
                parent: None,
                sort_order: None,
                is_active: Some(false),
                is_archived: None,
                cover_image: None,
            },
        )
        .await
        .unwrap();

    let tree = t.catalog.get_tree().await.unwrap();
    assert!(tree.is_empty(), "deactivated root must hide its children too");

    assert!(t.catalog.get_by_slug("hidden").await.unwrap().is_none());
}

#[tokio::test]
async fn related_excludes_self_and_ranks_featured_first() {
    let t = setup().await;

    let dresses = t.collections.create(collection("Dresses", None, 0)).await.unwrap();
    let dresses_id = dresses.id_string();

    let main = t.products.create(product("Main", &dresses_id, 0)).await.unwrap();
    t.products.create(product("Plain", &dresses_id, 1)).await.unwrap();
    let mut featured = product("Featured", &dresses_id, 9);
    featured.is_featured = Some(true);
    t.products.create(featured).await.unwrap();

    let related = t
        .catalog
        .list_related(&dresses_id, &main.id_string(), 4)
        .await
        .unwrap();
    let related_names: Vec<&str> = related.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(related_names, vec!["Featured", "Plain"]);

    // Truncation honors the limit; short results are not an error
    let one = t
        .catalog
        .list_related(&dresses_id, &main.id_string(), 1)
        .await
        .unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].name, "Featured");
}

#[tokio::test]
async fn product_requires_image_and_live_collection() {
    let t = setup().await;

    let dresses = t.collections.create(collection("Dresses", None, 0)).await.unwrap();

    let mut no_images = product("Bare", &dresses.id_string(), 0);
    no_images.images.clear();
    let err = t.products.create(no_images).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = t
        .products
        .create(product("Orphan", "collection:missing", 0))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    // Bespoke pieces may omit the price entirely
    let mut bespoke = product("Bespoke Gown", &dresses.id_string(), 0);
    bespoke.price = None;
    let created = t.products.create(bespoke).await.unwrap();
    assert!(created.price.is_none());
}

#[tokio::test]
async fn legacy_records_are_normalized_at_startup() {
    let t = setup().await;

    let archive = t.collections.create(collection("Archive", None, 0)).await.unwrap();
    let archive_ref = make_record_id("collection", &archive.id_string());

    // A record written by the previous storefront generation:
    // `title` + `category` instead of `name` + `collection`.
    t.db.db
        .query(
            "CREATE product SET title = $title, category = $category, \
             description = 'archival', is_active = true, created_at = 0, \
             images = [{ thumb_url: '/t.webp', full_url: '/f.webp' }]",
        )
        .bind(("title", "Archive Gown".to_string()))
        .bind(("category", archive_ref))
        .await
        .unwrap();

    migration::migrate_legacy_schema(&t.db.db).await.unwrap();

    // Canonical reads see the migrated record, including scoped queries
    // that filter on the canonical collection link
    let all = t.catalog.list_products(&Scope::All).await.unwrap();
    assert_eq!(names(&all), HashSet::from(["Archive Gown".into()]));

    let scoped = t
        .catalog
        .list_products(&Scope::Collection(archive.id_string()))
        .await
        .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].name, "Archive Gown");
    assert_eq!(scoped[0].collection_string(), archive.id_string());

    // Running the migration again is a no-op
    migration::migrate_legacy_schema(&t.db.db).await.unwrap();
    let again = t.catalog.list_products(&Scope::All).await.unwrap();
    assert_eq!(again.len(), 1);
}

#[tokio::test]
async fn archived_products_never_surface() {
    let t = setup().await;

    let dresses = t.collections.create(collection("Dresses", None, 0)).await.unwrap();
    let kept = t.products.create(product("Kept", &dresses.id_string(), 0)).await.unwrap();
    let gone = t.products.create(product("Gone", &dresses.id_string(), 1)).await.unwrap();

    t.products
        .update(
            &gone.id_string(),
            atelier_server::db::models::ProductUpdate {
                name: None,
                description: None,
                price: None,
                collection: None,
                business_type: None,
                images: None,
                available_sizes: None,
                in_stock: None,
                inspiration_image: None,
                customization_notes: None,
                is_active: None,
                is_archived: Some(true),
                is_featured: None,
                sort_order: None,
                tags: None,
            },
        )
        .await
        .unwrap();

    let all = t.catalog.list_products(&Scope::All).await.unwrap();
    assert_eq!(names(&all), HashSet::from(["Kept".into()]));

    let related = t
        .catalog
        .list_related(&dresses.id_string(), &kept.id_string(), 4)
        .await
        .unwrap();
    assert!(related.is_empty());
}
