//! Axum route handlers for the Discovery API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::catalog::{is_work_id, CatalogItem};
use crate::discovery::engine::{discover, DiscoveryOutcome, EXHAUSTED_MESSAGE};
use crate::discovery::record::record_decision;
use crate::errors::AppError;
use crate::identity::CurrentUser;
use crate::models::interaction::InsertOutcome;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NextItemQuery {
    pub genre: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NextItemResponse {
    pub genre: String,
    #[serde(flatten)]
    pub outcome: DiscoveryOutcome,
    pub cover_url: Option<String>,
    pub message: Option<String>,
}

impl NextItemResponse {
    fn new(genre: String, outcome: DiscoveryOutcome, covers_base_url: &str) -> Self {
        let cover_url = outcome
            .item()
            .and_then(|item| item.cover_url(covers_base_url));
        let message = match outcome {
            DiscoveryOutcome::Exhausted { .. } => Some(EXHAUSTED_MESSAGE.to_string()),
            _ => None,
        };
        Self {
            genre,
            outcome,
            cover_url,
            message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub genre: Option<String>,
    pub item: CatalogItem,
    pub liked: bool,
}

/// What happened to the submitted decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Recorded,
    AlreadyRecorded,
    /// Storage failed; the decision was dropped and discovery carried on.
    Failed,
}

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    /// False when the work was already in the user's history or storage failed.
    pub recorded: bool,
    pub status: DecisionStatus,
    pub next: NextItemResponse,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/discovery/next?genre=...
pub async fn handle_next_item(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<NextItemQuery>,
) -> Result<Json<NextItemResponse>, AppError> {
    let genre = resolve_genre(&state, params.genre);
    Ok(Json(next_item(&state, user_id, genre).await?))
}

/// POST /api/v1/discovery/decision
///
/// Records the accept/reject decision, then fetches a replacement whether or
/// not anything was inserted.
pub async fn handle_decision(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<DecisionResponse>, AppError> {
    if request.item.external_id.trim().is_empty() {
        return Err(AppError::Validation(
            "item.external_id cannot be empty".to_string(),
        ));
    }
    if !is_work_id(&request.item.external_id) {
        return Err(AppError::Validation(format!(
            "'{}' is not a catalog work id",
            request.item.external_id
        )));
    }

    let outcome =
        record_decision(state.history.as_ref(), user_id, &request.item, request.liked).await;
    let status = match outcome {
        Ok(InsertOutcome::Inserted) => DecisionStatus::Recorded,
        Ok(InsertOutcome::AlreadyRecorded) => DecisionStatus::AlreadyRecorded,
        Err(e) => {
            error!(
                "Error inserting record {} for user {user_id}: {e}",
                request.item.external_id
            );
            DecisionStatus::Failed
        }
    };

    let genre = resolve_genre(&state, request.genre);
    let next = next_item(&state, user_id, genre).await?;

    Ok(Json(DecisionResponse {
        recorded: status == DecisionStatus::Recorded,
        status,
        next,
    }))
}

fn resolve_genre(state: &AppState, genre: Option<String>) -> String {
    genre
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| state.config.default_genre.clone())
}

async fn next_item(
    state: &AppState,
    user_id: Uuid,
    genre: String,
) -> Result<NextItemResponse, AppError> {
    let cancel = state.shutdown.child_token();
    let outcome = discover(
        state.history.as_ref(),
        state.catalog.as_ref(),
        state.sampler.as_ref(),
        user_id,
        &genre,
        state.config.discovery_max_attempts,
        &cancel,
    )
    .await?;
    debug!(
        "Discovery for user {user_id} in '{genre}' finished after {} attempts",
        outcome.attempts()
    );

    Ok(NextItemResponse::new(
        genre,
        outcome,
        &state.config.covers_base_url,
    ))
}
