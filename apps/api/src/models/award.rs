use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Static award catalog entry (`awards` row).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AwardDefinitionRow {
    pub id: i32,
    pub award_name: String,
    pub award_desc: String,
    pub award_img: Option<String>,
}

/// `user_awards` row. `(user_id, award_id)` is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AwardGrantRow {
    pub user_id: Uuid,
    pub award_id: i32,
    pub created_at: DateTime<Utc>,
}

/// A grant joined with its definition, for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EarnedAward {
    pub award_id: i32,
    pub award_name: String,
    pub award_desc: String,
    pub award_img: Option<String>,
    pub granted_at: DateTime<Utc>,
}
