//! Award evaluation.
//!
//! Runs on every view of the awards list. Each pass loads the definitions,
//! skips awards the user already holds, evaluates the remaining rules against
//! one stats snapshot and inserts grants for the ones that pass. Failures are
//! logged and contained: a failed load ends the pass early, a failed insert
//! skips only that award.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::awards::rules::{qualifies, rule_for};
use crate::awards::AwardStore;
use crate::history::InteractionStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AwardEvaluation {
    pub newly_granted: Vec<i32>,
}

pub async fn evaluate_awards(
    awards: &dyn AwardStore,
    history: &dyn InteractionStore,
    user_id: Uuid,
) -> AwardEvaluation {
    let definitions = match awards.list_definitions().await {
        Ok(definitions) => definitions,
        Err(e) => {
            warn!("Error fetching award definitions: {e}");
            return AwardEvaluation::default();
        }
    };

    let granted: HashSet<i32> = match awards.list_grants(user_id).await {
        Ok(grants) => grants.into_iter().map(|g| g.award_id).collect(),
        Err(e) => {
            warn!("Error fetching awards for user {user_id}: {e}");
            return AwardEvaluation::default();
        }
    };

    let pending: Vec<i32> = definitions
        .iter()
        .map(|d| d.id)
        .filter(|id| !granted.contains(id) && rule_for(*id).is_some())
        .collect();
    if pending.is_empty() {
        return AwardEvaluation::default();
    }

    let stats = match history.stats(user_id).await {
        Ok(stats) => stats,
        Err(e) => {
            warn!("Error fetching history stats for user {user_id}: {e}");
            return AwardEvaluation::default();
        }
    };

    let mut newly_granted = Vec::new();
    for award_id in pending {
        if !qualifies(award_id, &stats) {
            continue;
        }
        match awards.insert_grant(user_id, award_id).await {
            Ok(true) => {
                info!("Granted award {award_id} to user {user_id}");
                newly_granted.push(award_id);
            }
            Ok(false) => debug!("Award {award_id} already granted to user {user_id}"),
            Err(e) => warn!("Error granting award {award_id} to user {user_id}: {e}"),
        }
    }

    AwardEvaluation { newly_granted }
}
