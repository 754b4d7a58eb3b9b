//! Public catalog browse API module

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/catalog", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/tree", get(handler::tree))
        .route("/collections/{slug}", get(handler::collection_page))
        .route("/collections/{slug}/count", get(handler::count))
        .route("/products", get(handler::list_products))
        .route("/products/{id}", get(handler::product_detail))
        .route("/products/{id}/related", get(handler::related))
}
