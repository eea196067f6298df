use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recorded accept/reject decision (`user_books` row).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InteractionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub external_id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub liked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInteraction {
    pub user_id: Uuid,
    pub external_id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub liked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOutcome {
    Inserted,
    AlreadyRecorded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionFilter {
    #[default]
    All,
    Liked,
    Disliked,
}

impl InteractionFilter {
    /// Value bound to the `liked` column, `None` meaning no restriction.
    pub fn liked(self) -> Option<bool> {
        match self {
            InteractionFilter::All => None,
            InteractionFilter::Liked => Some(true),
            InteractionFilter::Disliked => Some(false),
        }
    }
}

/// Aggregate counts over a user's full history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InteractionStats {
    pub total: i64,
    pub liked: i64,
    pub disliked: i64,
}
