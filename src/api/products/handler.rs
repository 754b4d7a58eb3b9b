//! Admin product handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert::ProductResponse;
use crate::core::AppState;
use crate::db::models::{ProductCreate, ProductUpdate};
use crate::utils::{AppError, AppResult};

/// GET /api/products - all browsable products (unscoped)
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.products().find_active_all().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/products/{id} - single product
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let product = state
        .products()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;
    Ok(Json(product.into()))
}

/// POST /api/products - create a product
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ProductResponse>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Product name must not be empty"));
    }
    let product = state.products().create(payload).await?;
    Ok(Json(product.into()))
}

/// PUT /api/products/{id} - update a product
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.products().update(&id, payload).await?;
    Ok(Json(product.into()))
}

/// DELETE /api/products/{id} - hard delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = state.products().delete(&id).await?;
    Ok(Json(result))
}
