//! Admin collection handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert::CollectionResponse;
use crate::core::AppState;
use crate::db::models::{CollectionCreate, CollectionUpdate};
use crate::utils::{AppError, AppResult};

/// GET /api/collections - all browsable collections (flat)
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CollectionResponse>>> {
    let collections = state.collections().find_active().await?;
    Ok(Json(collections.into_iter().map(Into::into).collect()))
}

/// GET /api/collections/{id} - single collection
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CollectionResponse>> {
    let collection = state
        .collections()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Collection {id} not found")))?;
    Ok(Json(collection.into()))
}

/// POST /api/collections - create a collection
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CollectionCreate>,
) -> AppResult<Json<CollectionResponse>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Collection name must not be empty"));
    }
    let collection = state.collections().create(payload).await?;
    Ok(Json(collection.into()))
}

/// PUT /api/collections/{id} - update a collection
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CollectionUpdate>,
) -> AppResult<Json<CollectionResponse>> {
    let collection = state.collections().update(&id, payload).await?;
    Ok(Json(collection.into()))
}

/// DELETE /api/collections/{id} - hard delete
///
/// Refused with 422 while child collections exist; products are not
/// cascaded.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = state.collections().delete(&id).await?;
    Ok(Json(result))
}
