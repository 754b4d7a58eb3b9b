//! Atelier Server - catalog backend for a boutique apparel storefront
//!
//! # Architecture overview
//!
//! The server renders no pages itself; it exposes the catalog to the
//! storefront as a small HTTP API:
//!
//! - **Catalog core** (`catalog`): collection tree resolution and product
//!   aggregation. All descendant expansion goes through one resolver.
//! - **Database** (`db`): embedded SurrealDB storage behind repositories
//! - **HTTP API** (`api`): public browse routes + admin write routes
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # Config, state, server
//! ├── catalog/       # Tree resolver + catalog aggregator
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Database layer (models, repositories, migration)
//! └── utils/         # Errors, logging, slug helper
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use crate::catalog::{CatalogService, Scope};
pub use crate::core::{AppState, Config, Server};
pub use crate::utils::{AppError, AppResult};

pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: dotenv, then logging.
///
/// Called once from `main` before anything else touches the config.
pub fn setup_environment() -> anyhow::Result<()> {
    // .env is optional; ignore a missing file
    let _ = dotenv::dotenv();
    init_logger();
    Ok(())
}
