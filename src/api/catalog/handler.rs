//! Public catalog browse handlers
//!
//! Read paths follow the storefront's degrade-to-empty policy: when the
//! store cannot be reached, list endpoints log and serve "no items"
//! instead of an error page. Single-resource endpoints return 404 for
//! dead links.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::convert::{
    CollectionTreeResponse, CollectionWithChildrenResponse, ProductResponse,
    products_to_responses,
};
use crate::catalog::Scope;
use crate::core::AppState;
use crate::utils::{AppError, AppResult};

/// GET /api/catalog/tree - nested collection forest for navigation
pub async fn tree(State(state): State<AppState>) -> Json<Vec<CollectionTreeResponse>> {
    let catalog = state.catalog();
    match catalog.get_tree().await {
        Ok(tree) => Json(tree.into_iter().map(Into::into).collect()),
        Err(e) => {
            tracing::warn!(error = %e, "collection tree query failed, serving empty forest");
            Json(Vec::new())
        }
    }
}

/// GET /api/catalog/collections/{slug} - category landing page payload
pub async fn collection_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<CollectionWithChildrenResponse>> {
    let catalog = state.catalog();
    let resolved = catalog.get_by_slug(&slug).await?;
    resolved
        .map(|c| Json(c.into()))
        .ok_or_else(|| AppError::not_found(format!("Collection '{slug}' not found")))
}

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    /// "all" (default) or a collection slug
    pub scope: Option<String>,
}

/// GET /api/catalog/products?scope=all|{slug} - aggregated product list
///
/// An unresolved slug degrades to an empty list, never an error: a dead
/// link browses as "no items found".
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Json<Vec<ProductResponse>> {
    let catalog = state.catalog();

    let scope = match query.scope.as_deref() {
        None | Some("all") => Scope::All,
        Some(slug) => match catalog.get_by_slug(slug).await {
            Ok(Some(resolved)) => Scope::Collection(resolved.collection.id_string()),
            Ok(None) => return Json(Vec::new()),
            Err(e) => {
                tracing::warn!(error = %e, slug, "scope resolution failed, serving empty list");
                return Json(Vec::new());
            }
        },
    };

    match catalog.list_products(&scope).await {
        Ok(products) => Json(products_to_responses(products)),
        Err(e) => {
            tracing::warn!(error = %e, "product listing failed, serving empty list");
            Json(Vec::new())
        }
    }
}

/// GET /api/catalog/products/{id} - product detail page
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.products().find_by_id(&id).await?;
    match product {
        Some(p) if p.is_browsable() => Ok(Json(p.into())),
        _ => Err(AppError::not_found(format!("Product {id} not found"))),
    }
}

#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    pub limit: Option<usize>,
}

/// GET /api/catalog/products/{id}/related?limit=N - same-collection
/// related strip, featured first
pub async fn related(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RelatedQuery>,
) -> Json<Vec<ProductResponse>> {
    let limit = query.limit.unwrap_or(state.config.related_limit);
    let catalog = state.catalog();

    let product = match state.products().find_by_id(&id).await {
        Ok(Some(p)) => p,
        Ok(None) => return Json(Vec::new()),
        Err(e) => {
            tracing::warn!(error = %e, "related lookup failed, serving empty strip");
            return Json(Vec::new());
        }
    };

    match catalog
        .list_related(&product.collection_string(), &id, limit)
        .await
    {
        Ok(products) => Json(products_to_responses(products)),
        Err(e) => {
            tracing::warn!(error = %e, "related listing failed, serving empty strip");
            Json(Vec::new())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

/// GET /api/catalog/collections/{slug}/count - display count for the
/// collection's whole descendant scope
pub async fn count(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Json<CountResponse> {
    let catalog = state.catalog();

    let resolved = match catalog.get_by_slug(&slug).await {
        Ok(Some(resolved)) => resolved,
        Ok(None) => return Json(CountResponse { count: 0 }),
        Err(e) => {
            tracing::warn!(error = %e, slug, "count resolution failed, serving zero");
            return Json(CountResponse { count: 0 });
        }
    };

    match catalog.count_in_scope(&resolved.collection.id_string()).await {
        Ok(count) => Json(CountResponse { count }),
        Err(e) => {
            tracing::warn!(error = %e, slug, "count query failed, serving zero");
            Json(CountResponse { count: 0 })
        }
    }
}
