//! Database Module
//!
//! Embedded SurrealDB storage. Repositories live in [`repository`],
//! models in [`models`]; [`migration`] normalizes records written under
//! the legacy storefront schema.

pub mod migration;
pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "atelier";
const DATABASE: &str = "catalog";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::finish(db).await
    }

    /// Open a throwaway in-memory database. Used by tests.
    pub async fn new_memory() -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::finish(db).await
    }

    async fn finish(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database connection established (embedded SurrealDB)");

        // Normalize any records still carrying the legacy field names
        migration::migrate_legacy_schema(&db)
            .await
            .map_err(|e| AppError::database(format!("Legacy schema migration failed: {e}")))?;

        Ok(Self { db })
    }
}
