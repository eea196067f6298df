use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::CatalogItem;
use crate::history::InteractionStore;
use crate::models::interaction::{InsertOutcome, NewInteraction};

const UNKNOWN_AUTHOR: &str = "Unknown";

impl NewInteraction {
    /// Builds the row for a decision. Only accepted works carry the title and
    /// author snapshot; rejections store the identifier alone.
    pub fn from_decision(user_id: Uuid, item: &CatalogItem, liked: bool) -> Self {
        let (title, author) = if liked {
            (
                Some(item.title.clone()),
                Some(item.primary_creator().unwrap_or(UNKNOWN_AUTHOR).to_string()),
            )
        } else {
            (None, None)
        };

        NewInteraction {
            user_id,
            external_id: item.external_id.clone(),
            title,
            author,
            liked,
        }
    }
}

/// Records an accept/reject decision. A work the user already decided on is
/// left untouched and reported as `AlreadyRecorded`.
pub async fn record_decision(
    history: &dyn InteractionStore,
    user_id: Uuid,
    item: &CatalogItem,
    liked: bool,
) -> Result<InsertOutcome, sqlx::Error> {
    let record = NewInteraction::from_decision(user_id, item, liked);
    let outcome = history.insert(&record).await?;

    match outcome {
        InsertOutcome::Inserted => info!(
            "Recorded {} (liked={liked}) for user {user_id}",
            record.external_id
        ),
        InsertOutcome::AlreadyRecorded => debug!(
            "Book {} already exists for user {user_id}",
            record.external_id
        ),
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interaction::InteractionFilter;
    use crate::test_support::{book, InMemoryHistory};

    #[tokio::test]
    async fn test_like_stores_title_and_author() {
        let history = InMemoryHistory::default();
        let user = Uuid::new_v4();

        let outcome = record_decision(&history, user, &book("OL7W", true), true)
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::Inserted);
        let rows = history.list(user, InteractionFilter::All).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title.as_deref(), Some("Title OL7W"));
        assert_eq!(rows[0].author.as_deref(), Some("Author OL7W"));
        assert!(rows[0].liked);
    }

    #[tokio::test]
    async fn test_dislike_stores_identifier_only() {
        let history = InMemoryHistory::default();
        let user = Uuid::new_v4();

        record_decision(&history, user, &book("OL7W", true), false)
            .await
            .unwrap();

        let rows = history.list(user, InteractionFilter::All).await.unwrap();
        assert_eq!(rows[0].external_id, "OL7W");
        assert!(rows[0].title.is_none());
        assert!(rows[0].author.is_none());
        assert!(!rows[0].liked);
    }

    #[tokio::test]
    async fn test_reject_after_accept_inserts_nothing() {
        let history = InMemoryHistory::default();
        let user = Uuid::new_v4();
        history.seed(user, "OL7W", true);

        let outcome = record_decision(&history, user, &book("OL7W", true), false)
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::AlreadyRecorded);
        let rows = history.list(user, InteractionFilter::All).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].liked);
    }

    #[tokio::test]
    async fn test_same_work_for_different_users() {
        let history = InMemoryHistory::default();
        let item = book("OL7W", true);

        for _ in 0..2 {
            let outcome = record_decision(&history, Uuid::new_v4(), &item, true)
                .await
                .unwrap();
            assert_eq!(outcome, InsertOutcome::Inserted);
        }
    }

    #[test]
    fn test_missing_author_defaults_to_unknown() {
        let mut item = book("OL9W", true);
        item.creators.clear();
        let record = NewInteraction::from_decision(Uuid::new_v4(), &item, true);
        assert_eq!(record.author.as_deref(), Some("Unknown"));
    }
}
