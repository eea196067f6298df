use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::interaction::{
    InsertOutcome, InteractionFilter, InteractionRow, InteractionStats, NewInteraction,
};

/// Storage for interaction rows. Carried in `AppState` as `Arc<dyn InteractionStore>`.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn seen_external_ids(&self, user_id: Uuid) -> Result<HashSet<String>, sqlx::Error>;

    async fn list(
        &self,
        user_id: Uuid,
        filter: InteractionFilter,
    ) -> Result<Vec<InteractionRow>, sqlx::Error>;

    async fn find(
        &self,
        user_id: Uuid,
        external_id: &str,
    ) -> Result<Option<InteractionRow>, sqlx::Error>;

    /// Inserts unless the `(user_id, external_id)` pair is already recorded.
    async fn insert(&self, record: &NewInteraction) -> Result<InsertOutcome, sqlx::Error>;

    /// Returns `false` when nothing matched.
    async fn delete(&self, user_id: Uuid, external_id: &str) -> Result<bool, sqlx::Error>;

    async fn stats(&self, user_id: Uuid) -> Result<InteractionStats, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgInteractionStore {
    pool: PgPool,
}

impl PgInteractionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionStore for PgInteractionStore {
    async fn seen_external_ids(&self, user_id: Uuid) -> Result<HashSet<String>, sqlx::Error> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT external_id FROM user_books WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids.into_iter().collect())
    }

    async fn list(
        &self,
        user_id: Uuid,
        filter: InteractionFilter,
    ) -> Result<Vec<InteractionRow>, sqlx::Error> {
        sqlx::query_as::<_, InteractionRow>(
            r#"
            SELECT *
            FROM user_books
            WHERE user_id = $1 AND ($2::BOOLEAN IS NULL OR liked = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(filter.liked())
        .fetch_all(&self.pool)
        .await
    }

    async fn find(
        &self,
        user_id: Uuid,
        external_id: &str,
    ) -> Result<Option<InteractionRow>, sqlx::Error> {
        sqlx::query_as::<_, InteractionRow>(
            "SELECT * FROM user_books WHERE user_id = $1 AND external_id = $2",
        )
        .bind(user_id)
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert(&self, record: &NewInteraction) -> Result<InsertOutcome, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_books (user_id, external_id, title, author, liked)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, external_id) DO NOTHING
            "#,
        )
        .bind(record.user_id)
        .bind(&record.external_id)
        .bind(&record.title)
        .bind(&record.author)
        .bind(record.liked)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() == 0 {
            InsertOutcome::AlreadyRecorded
        } else {
            InsertOutcome::Inserted
        })
    }

    async fn delete(&self, user_id: Uuid, external_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_books WHERE user_id = $1 AND external_id = $2")
            .bind(user_id)
            .bind(external_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self, user_id: Uuid) -> Result<InteractionStats, sqlx::Error> {
        sqlx::query_as::<_, InteractionStats>(
            r#"
            SELECT
                COUNT(*)                             AS total,
                COUNT(*) FILTER (WHERE liked)        AS liked,
                COUNT(*) FILTER (WHERE NOT liked)    AS disliked
            FROM user_books
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}
