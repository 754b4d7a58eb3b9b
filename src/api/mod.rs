//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`catalog`] - public browse routes (tree, slug pages, product lists)
//! - [`collections`] - admin collection management
//! - [`products`] - admin product management
//!
//! Public browse routes degrade to empty results when the store is
//! unreachable; admin routes surface errors directly.

pub mod convert;

pub mod catalog;
pub mod collections;
pub mod health;
pub mod products;

use axum::Router;

use crate::core::AppState;

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(catalog::router())
        .merge(collections::router())
        .merge(products::router())
        .with_state(state)
}

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
