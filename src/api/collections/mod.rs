//! Admin collection API module
//!
//! Authentication is enforced by the deployment's reverse proxy, not
//! here; the original client-side gate was not a security boundary and
//! is intentionally not reproduced.

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/collections", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
