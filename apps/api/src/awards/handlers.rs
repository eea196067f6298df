//! Axum route handlers for the Awards API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::awards::evaluator::evaluate_awards;
use crate::errors::AppError;
use crate::identity::CurrentUser;
use crate::models::award::EarnedAward;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AwardsResponse {
    pub newly_granted: Vec<i32>,
    pub awards: Vec<EarnedAward>,
}

/// GET /api/v1/awards
///
/// Re-evaluates the award rules, then returns everything the user holds.
pub async fn handle_list_awards(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<AwardsResponse>, AppError> {
    let evaluation =
        evaluate_awards(state.awards.as_ref(), state.history.as_ref(), user_id).await;
    let awards = state.awards.list_earned(user_id).await?;

    Ok(Json(AwardsResponse {
        newly_granted: evaluation.newly_granted,
        awards,
    }))
}
