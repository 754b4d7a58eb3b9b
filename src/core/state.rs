use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::catalog::CatalogService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{CollectionRepository, ProductRepository};
use crate::utils::AppError;

/// Application state shared by every handler.
///
/// Cloning is shallow: the database handle is reference counted, so
/// handlers construct repositories on demand from `db` instead of
/// holding them here.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
}

impl AppState {
    /// Initialize the application state:
    /// 1. working directory structure
    /// 2. embedded database (work_dir/database/catalog.db) + legacy
    ///    schema migration
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("catalog.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
        })
    }

    /// Catalog aggregator over the current database handle.
    ///
    /// Built per call on purpose: the service carries no cache, so every
    /// request reads a fresh snapshot (admin writes are visible on the
    /// next read without any invalidation).
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.db.clone())
    }

    pub fn collections(&self) -> CollectionRepository {
        CollectionRepository::new(self.db.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.db.clone())
    }
}
