//! Collection Repository

use chrono::Utc;
use serde::Serialize;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_record_id, strip_table_prefix};
use crate::db::models::{Collection, CollectionCreate, CollectionUpdate};
use crate::utils::slug::slugify;

const TABLE: &str = "collection";

#[derive(Clone)]
pub struct CollectionRepository {
    base: BaseRepository,
}

impl CollectionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All browsable collections, ordered by sort_order then creation
    /// time (newest last among equal sort keys).
    ///
    /// This is the snapshot the tree resolver works from: inactive or
    /// archived nodes never reach it, so their subtrees are implicitly
    /// hidden even when individual children are active.
    pub async fn find_active(&self) -> RepoResult<Vec<Collection>> {
        let collections: Vec<Collection> = self
            .base
            .db()
            .query(
                "SELECT * FROM collection WHERE is_active = true AND is_archived != true \
                 ORDER BY sort_order, created_at",
            )
            .await?
            .take(0)?;
        Ok(collections)
    }

    /// Find collection by id (active or not — admin paths need both)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Collection>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let collection: Option<Collection> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(collection)
    }

    /// Resolve a URL slug to a browsable collection
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Collection>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM collection WHERE slug = $slug AND is_active = true \
                 AND is_archived != true LIMIT 1",
            )
            .bind(("slug", slug_owned))
            .await?;
        let collections: Vec<Collection> = result.take(0)?;
        Ok(collections.into_iter().next())
    }

    /// Direct (one-level) browsable children, in sibling order
    pub async fn find_children(&self, id: &str) -> RepoResult<Vec<Collection>> {
        let parent = make_record_id(TABLE, id);
        let children: Vec<Collection> = self
            .base
            .db()
            .query(
                "SELECT * FROM collection WHERE parent = $parent AND is_active = true \
                 AND is_archived != true ORDER BY sort_order, created_at",
            )
            .bind(("parent", parent))
            .await?
            .take(0)?;
        Ok(children)
    }

    /// Create a new collection.
    ///
    /// The slug is derived from the name when absent and made unique
    /// among live (non-archived) collections by suffixing a counter.
    pub async fn create(&self, data: CollectionCreate) -> RepoResult<Collection> {
        let parent = match data.parent.as_deref() {
            Some(parent_id) => {
                let parent = self
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| {
                        RepoError::NotFound(format!("Parent collection {parent_id} not found"))
                    })?;
                parent.id
            }
            None => None,
        };

        let base_slug = match data.slug.as_deref() {
            Some(s) if !s.is_empty() => slugify(s),
            _ => slugify(&data.name),
        };
        let slug = self.unique_slug(&base_slug, None).await?;

        let collection = Collection {
            id: None,
            name: data.name,
            slug,
            parent,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
            is_archived: false,
            cover_image: data.cover_image,
            created_at: Utc::now().timestamp_millis(),
        };

        let created: Option<Collection> = self.base.db().create(TABLE).content(collection).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create collection".to_string()))
    }

    /// Update a collection.
    ///
    /// Parent reassignment is cycle-guarded: an assignment that would
    /// make the collection its own ancestor is rejected outright.
    pub async fn update(&self, id: &str, data: CollectionUpdate) -> RepoResult<Collection> {
        let pure_id = strip_table_prefix(TABLE, id);

        let existing = self
            .find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Collection {id} not found")))?;

        let parent = match data.parent.as_deref() {
            Some(parent_id) => {
                self.find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| {
                        RepoError::NotFound(format!("Parent collection {parent_id} not found"))
                    })?;
                if self.would_create_cycle(pure_id, parent_id).await? {
                    return Err(RepoError::Validation(format!(
                        "Cannot set parent {parent_id}: collection {id} would become its own ancestor"
                    )));
                }
                Some(make_record_id(TABLE, parent_id))
            }
            None => None,
        };

        let slug = match data.slug.as_deref() {
            Some(s) if slugify(s) != existing.slug => {
                Some(self.unique_slug(&slugify(s), Some(pure_id)).await?)
            }
            _ => None,
        };

        #[derive(Serialize)]
        struct CollectionUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            parent: Option<RecordId>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sort_order: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_archived: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            cover_image: Option<String>,
        }

        let update_data = CollectionUpdateDb {
            name: data.name,
            slug,
            parent,
            sort_order: data.sort_order,
            is_active: data.is_active,
            is_archived: data.is_archived,
            cover_image: data.cover_image,
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
            .ok_or_else(|| RepoError::NotFound(format!("Collection {id} not found")))
    }

    /// Hard delete a collection.
    ///
    /// Refused while any child collection exists (active or not); there
    /// is no cascade. Products referencing the deleted collection are
    /// left in place for manual re-homing.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);

        let existing = self.find_by_id(pure_id).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Collection {id} not found")));
        }

        let thing = make_record_id(TABLE, pure_id);
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM collection WHERE parent = $parent GROUP ALL")
            .bind(("parent", thing.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;

        if count.unwrap_or(0) > 0 {
            return Err(RepoError::HasChildren(format!(
                "Cannot delete collection {id} while it has child collections"
            )));
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;

        Ok(true)
    }

    /// Make `base` unique among live collections by suffixing an
    /// incrementing counter on collision (`jackets`, `jackets-2`, ...).
    ///
    /// `exclude_id` skips the collection being updated so a no-op slug
    /// write does not collide with itself.
    async fn unique_slug(&self, base: &str, exclude_id: Option<&str>) -> RepoResult<String> {
        let mut candidate = base.to_string();
        let mut counter = 2;
        while self.slug_taken(&candidate, exclude_id).await? {
            candidate = format!("{base}-{counter}");
            counter += 1;
        }
        Ok(candidate)
    }

    async fn slug_taken(&self, slug: &str, exclude_id: Option<&str>) -> RepoResult<bool> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM collection WHERE slug = $slug AND is_archived != true")
            .bind(("slug", slug_owned))
            .await?;
        let matches: Vec<Collection> = result.take(0)?;
        let exclude = exclude_id.map(|id| make_record_id(TABLE, id).to_string());
        Ok(matches.iter().any(|c| match &exclude {
            Some(ex) => c.id_string() != *ex,
            None => true,
        }))
    }

    /// Walk the proposed parent chain; true when it loops back to `id`.
    ///
    /// Visited guard keeps the walk finite even if existing data is
    /// already corrupt.
    async fn would_create_cycle(&self, id: &str, new_parent: &str) -> RepoResult<bool> {
        let target = make_record_id(TABLE, id).to_string();
        let mut visited = std::collections::HashSet::new();
        let mut current = Some(make_record_id(TABLE, new_parent).to_string());

        while let Some(current_id) = current {
            if current_id == target {
                return Ok(true);
            }
            if !visited.insert(current_id.clone()) {
                tracing::warn!(
                    collection = %current_id,
                    "cycle already present in collection parents, stopping walk"
                );
                return Ok(false);
            }
            current = match self.find_by_id(&current_id).await? {
                Some(node) => node.parent_string(),
                None => None,
            };
        }

        Ok(false)
    }
}
