//! One-time legacy schema migration.
//!
//! The original storefront wrote products under two naming generations
//! (`title`/`category` vs `name`/`collection`). Runs at startup and
//! rewrites any record still using the old field names so repositories
//! and the catalog core only ever see the canonical shape.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::RepoResult;

/// Row shape for counting migrated records; the full record contains
/// record links that `serde_json::Value` cannot represent.
#[derive(serde::Deserialize)]
struct MigratedRow {
    #[allow(dead_code)]
    id: surrealdb::RecordId,
}

/// Rewrite legacy product records to the canonical field names.
///
/// Idempotent: records already in canonical shape are untouched, so the
/// migration is safe to run on every startup.
pub async fn migrate_legacy_schema(db: &Surreal<Db>) -> RepoResult<()> {
    // Legacy `category` record link -> canonical `collection`
    let mut res = db
        .query(
            "UPDATE product SET collection = category, category = NONE \
             WHERE collection = NONE AND category != NONE RETURN AFTER",
        )
        .await?;
    let migrated_refs: Vec<MigratedRow> = res.take(0)?;

    // Legacy `title` -> canonical `name`
    let mut res = db
        .query(
            "UPDATE product SET name = title, title = NONE \
             WHERE name = NONE AND title != NONE RETURN AFTER",
        )
        .await?;
    let migrated_titles: Vec<MigratedRow> = res.take(0)?;

    if !migrated_refs.is_empty() || !migrated_titles.is_empty() {
        tracing::info!(
            collection_refs = migrated_refs.len(),
            titles = migrated_titles.len(),
            "Migrated legacy product records to canonical schema"
        );
    }

    Ok(())
}
