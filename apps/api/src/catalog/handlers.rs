//! Axum route handlers for catalog lookups.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::catalog::genres::genre_labels;
use crate::catalog::{is_work_id, CatalogError};
use crate::errors::AppError;
use crate::identity::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenresResponse {
    pub genres: Vec<&'static str>,
    pub default_genre: String,
}

#[derive(Debug, Serialize)]
pub struct WorkDetailResponse {
    pub external_id: String,
    pub description: String,
    pub cover_ids: Vec<i64>,
}

/// GET /api/v1/genres
pub async fn handle_list_genres(State(state): State<AppState>) -> Json<GenresResponse> {
    Json(GenresResponse {
        genres: genre_labels(),
        default_genre: state.config.default_genre.clone(),
    })
}

/// GET /api/v1/catalog/works/:external_id
pub async fn handle_work_detail(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(external_id): Path<String>,
) -> Result<Json<WorkDetailResponse>, AppError> {
    if !is_work_id(&external_id) {
        return Err(AppError::Validation(format!(
            "'{external_id}' is not a catalog work id"
        )));
    }

    let detail = match state.catalog.item_detail(&external_id).await {
        Ok(detail) => detail,
        Err(CatalogError::Status { status: 404, .. }) => {
            return Err(AppError::NotFound(format!("Work {external_id} not found")));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(WorkDetailResponse {
        description: detail.description_or_default().to_string(),
        external_id: detail.external_id,
        cover_ids: detail.cover_ids,
    }))
}
