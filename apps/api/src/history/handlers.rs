//! Axum route handlers for the user's recorded decisions.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{cover_url, is_work_id, work_url, NO_DESCRIPTION};
use crate::errors::AppError;
use crate::history::export::{export_filename, render_liked_csv, EMPTY_EXPORT_MESSAGE};
use crate::identity::CurrentUser;
use crate::models::interaction::{InteractionFilter, InteractionRow, InteractionStats};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub filter: InteractionFilter,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub interactions: Vec<InteractionRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikedBook {
    pub external_id: String,
    pub title: Option<String>,
    pub author: Option<String>,
}

impl From<InteractionRow> for LikedBook {
    fn from(row: InteractionRow) -> Self {
        LikedBook {
            external_id: row.external_id,
            title: row.title,
            author: row.author,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikedListResponse {
    pub books: Vec<LikedBook>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikedBookDetail {
    #[serde(flatten)]
    pub book: LikedBook,
    pub description: String,
    pub cover_id: Option<i64>,
    pub cover_url: Option<String>,
    pub catalog_url: String,
    pub isbn13: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/history?filter=all|liked|disliked
pub async fn handle_history(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let interactions = state.history.list(user_id, params.filter).await?;
    Ok(Json(HistoryResponse { interactions }))
}

/// GET /api/v1/liked
pub async fn handle_list_liked(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<LikedListResponse>, AppError> {
    let rows = state.history.list(user_id, InteractionFilter::Liked).await?;
    Ok(Json(LikedListResponse {
        books: rows.into_iter().map(LikedBook::from).collect(),
    }))
}

/// GET /api/v1/liked/export
///
/// Liked titles as a CSV attachment. 404 when there is nothing to export.
pub async fn handle_export_liked(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Response, AppError> {
    let rows = state.history.list(user_id, InteractionFilter::Liked).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound(EMPTY_EXPORT_MESSAGE.to_string()));
    }

    let body = render_liked_csv(&rows)?;
    info!("Exported {} liked books for user {user_id}", rows.len());

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(Utc::now().date_naive())
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// GET /api/v1/liked/:external_id
///
/// Enriches a liked title with catalog data. Catalog failures degrade the
/// response instead of failing it.
pub async fn handle_liked_detail(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(external_id): Path<String>,
) -> Result<Json<LikedBookDetail>, AppError> {
    if !is_work_id(&external_id) {
        return Err(AppError::Validation(format!(
            "'{external_id}' is not a catalog work id"
        )));
    }

    let row = state
        .history
        .find(user_id, &external_id)
        .await?
        .filter(|row| row.liked)
        .ok_or_else(|| AppError::NotFound(format!("Liked book {external_id} not found")))?;

    let (description, cover_id) = match state.catalog.item_detail(&external_id).await {
        Ok(detail) => (
            detail.description_or_default().to_string(),
            detail.cover_ids.first().copied(),
        ),
        Err(e) => {
            warn!("Failed to fetch catalog detail for {external_id}: {e}");
            (NO_DESCRIPTION.to_string(), None)
        }
    };

    let isbn13 = match state.catalog.first_isbn13(&external_id).await {
        Ok(isbn) => isbn,
        Err(e) => {
            warn!("Could not fetch ISBN-13 for {external_id}: {e}");
            None
        }
    };

    Ok(Json(LikedBookDetail {
        catalog_url: work_url(&state.config.catalog_base_url, &external_id),
        cover_url: cover_id.map(|id| cover_url(&state.config.covers_base_url, id)),
        book: LikedBook::from(row),
        description,
        cover_id,
        isbn13,
    }))
}

/// DELETE /api/v1/liked/:external_id
///
/// Removes the decision entirely. Awards already granted are kept.
pub async fn handle_remove_liked(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(external_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.history.delete(user_id, &external_id).await? {
        return Err(AppError::NotFound(format!(
            "Book {external_id} not found in your list"
        )));
    }
    info!("User {user_id} removed {external_id} from their list");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/profile/stats
pub async fn handle_profile_stats(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<InteractionStats>, AppError> {
    Ok(Json(state.history.stats(user_id).await?))
}
