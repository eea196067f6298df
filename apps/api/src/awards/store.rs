use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::award::{AwardDefinitionRow, AwardGrantRow, EarnedAward};

/// Storage for award definitions and grants. Carried in `AppState` as `Arc<dyn AwardStore>`.
#[async_trait]
pub trait AwardStore: Send + Sync {
    async fn list_definitions(&self) -> Result<Vec<AwardDefinitionRow>, sqlx::Error>;

    async fn list_grants(&self, user_id: Uuid) -> Result<Vec<AwardGrantRow>, sqlx::Error>;

    /// Returns `false` when the user already holds the award.
    async fn insert_grant(&self, user_id: Uuid, award_id: i32) -> Result<bool, sqlx::Error>;

    /// Grants joined with their definitions, oldest first.
    async fn list_earned(&self, user_id: Uuid) -> Result<Vec<EarnedAward>, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgAwardStore {
    pool: PgPool,
}

impl PgAwardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AwardStore for PgAwardStore {
    async fn list_definitions(&self) -> Result<Vec<AwardDefinitionRow>, sqlx::Error> {
        sqlx::query_as::<_, AwardDefinitionRow>("SELECT * FROM awards ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    async fn list_grants(&self, user_id: Uuid) -> Result<Vec<AwardGrantRow>, sqlx::Error> {
        sqlx::query_as::<_, AwardGrantRow>(
            "SELECT * FROM user_awards WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn insert_grant(&self, user_id: Uuid, award_id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_awards (user_id, award_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, award_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(award_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_earned(&self, user_id: Uuid) -> Result<Vec<EarnedAward>, sqlx::Error> {
        sqlx::query_as::<_, EarnedAward>(
            r#"
            SELECT a.id AS award_id, a.award_name, a.award_desc, a.award_img,
                   ua.created_at AS granted_at
            FROM user_awards ua
            JOIN awards a ON a.id = ua.award_id
            WHERE ua.user_id = $1
            ORDER BY ua.created_at, a.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
