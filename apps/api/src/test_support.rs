//! In-memory stand-ins for the catalog, stores and sampler.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::awards::AwardStore;
use crate::catalog::{CatalogError, CatalogItem, CatalogSource, ItemDetail};
use crate::config::Config;
use crate::discovery::OffsetSampler;
use crate::history::InteractionStore;
use crate::models::award::{AwardDefinitionRow, AwardGrantRow, EarnedAward};
use crate::models::interaction::{
    InsertOutcome, InteractionFilter, InteractionRow, InteractionStats, NewInteraction,
};
use crate::state::AppState;

pub fn book(external_id: &str, with_cover: bool) -> CatalogItem {
    CatalogItem {
        external_id: external_id.to_string(),
        title: format!("Title {external_id}"),
        creators: vec![format!("Author {external_id}")],
        cover_id: with_cover.then_some(12345),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

/// Catalog whose category holds `total` works; `items[n]` is the work at offset `n`.
#[derive(Default)]
pub struct FakeCatalog {
    total: u64,
    items: Vec<CatalogItem>,
    transient_failures: AtomicU32,
    malformed: bool,
    details: HashMap<String, ItemDetail>,
    isbn13: HashMap<String, String>,
    count_calls: AtomicU32,
    item_calls: AtomicU32,
    slugs: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new(total: u64, items: Vec<CatalogItem>) -> Self {
        Self {
            total,
            items,
            ..Default::default()
        }
    }

    /// The first `n` count queries fail with a 503.
    pub fn with_transient_failures(self, n: u32) -> Self {
        self.transient_failures.store(n, Ordering::SeqCst);
        self
    }

    pub fn malformed(mut self) -> Self {
        self.malformed = true;
        self
    }

    pub fn with_detail(mut self, detail: ItemDetail) -> Self {
        self.details.insert(detail.external_id.clone(), detail);
        self
    }

    pub fn with_isbn13(mut self, external_id: &str, isbn: &str) -> Self {
        self.isbn13.insert(external_id.to_string(), isbn.to_string());
        self
    }

    pub fn count_calls(&self) -> u32 {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self) -> u32 {
        self.item_calls.load(Ordering::SeqCst)
    }

    pub fn slugs_requested(&self) -> Vec<String> {
        self.slugs.lock().unwrap().clone()
    }
}

fn unavailable(path: String) -> CatalogError {
    CatalogError::Status { status: 503, path }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn category_item_count(&self, slug: &str) -> Result<u64, CatalogError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.slugs.lock().unwrap().push(slug.to_string());

        if self.malformed {
            let err = serde_json::from_str::<serde_json::Value>("{\"work_count\":").unwrap_err();
            return Err(CatalogError::Decode(err));
        }
        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(unavailable(format!("/subjects/{slug}.json")));
        }
        Ok(self.total)
    }

    async fn items_at_offset(
        &self,
        _slug: &str,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .items
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn item_detail(&self, external_id: &str) -> Result<ItemDetail, CatalogError> {
        self.details
            .get(external_id)
            .cloned()
            .ok_or_else(|| CatalogError::Status {
                status: 404,
                path: format!("/works/{external_id}.json"),
            })
    }

    async fn first_isbn13(&self, external_id: &str) -> Result<Option<String>, CatalogError> {
        Ok(self.isbn13.get(external_id).cloned())
    }
}

/// Hands out scripted offsets in order, then zeros.
#[derive(Default)]
pub struct ScriptedSampler {
    offsets: Mutex<VecDeque<u64>>,
}

impl ScriptedSampler {
    pub fn new(offsets: &[u64]) -> Self {
        Self {
            offsets: Mutex::new(offsets.iter().copied().collect()),
        }
    }
}

impl OffsetSampler for ScriptedSampler {
    fn sample(&self, total: u64) -> u64 {
        let next = self.offsets.lock().unwrap().pop_front().unwrap_or(0);
        next % total.max(1)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// History
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryHistory {
    rows: Mutex<Vec<InteractionRow>>,
    fail_reads: bool,
}

impl InMemoryHistory {
    /// Every read and insert fails as if the pool were exhausted.
    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Default::default()
        }
    }

    pub fn seed(&self, user_id: Uuid, external_id: &str, liked: bool) {
        self.rows.lock().unwrap().push(InteractionRow {
            id: Uuid::new_v4(),
            user_id,
            external_id: external_id.to_string(),
            title: liked.then(|| format!("Title {external_id}")),
            author: liked.then(|| format!("Author {external_id}")),
            liked,
            created_at: Utc::now(),
        });
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.fail_reads {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl InteractionStore for InMemoryHistory {
    async fn seen_external_ids(&self, user_id: Uuid) -> Result<HashSet<String>, sqlx::Error> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.external_id.clone())
            .collect())
    }

    async fn list(
        &self,
        user_id: Uuid,
        filter: InteractionFilter,
    ) -> Result<Vec<InteractionRow>, sqlx::Error> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && filter.liked().map_or(true, |l| l == r.liked))
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        user_id: Uuid,
        external_id: &str,
    ) -> Result<Option<InteractionRow>, sqlx::Error> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id && r.external_id == external_id)
            .cloned())
    }

    async fn insert(&self, record: &NewInteraction) -> Result<InsertOutcome, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|r| r.user_id == record.user_id && r.external_id == record.external_id)
        {
            return Ok(InsertOutcome::AlreadyRecorded);
        }
        rows.push(InteractionRow {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            external_id: record.external_id.clone(),
            title: record.title.clone(),
            author: record.author.clone(),
            liked: record.liked,
            created_at: Utc::now(),
        });
        Ok(InsertOutcome::Inserted)
    }

    async fn delete(&self, user_id: Uuid, external_id: &str) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.user_id == user_id && r.external_id == external_id));
        Ok(rows.len() < before)
    }

    async fn stats(&self, user_id: Uuid) -> Result<InteractionStats, sqlx::Error> {
        let rows = self.list(user_id, InteractionFilter::All).await?;
        let liked = rows.iter().filter(|r| r.liked).count() as i64;
        Ok(InteractionStats {
            total: rows.len() as i64,
            liked,
            disliked: rows.len() as i64 - liked,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Awards
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryAwards {
    definitions: Vec<AwardDefinitionRow>,
    grants: Mutex<Vec<AwardGrantRow>>,
    failing_award: Option<i32>,
}

impl InMemoryAwards {
    /// Definitions 1 through 5, matching the migration seed.
    pub fn seeded() -> Self {
        let definitions = (1..=5)
            .map(|id| AwardDefinitionRow {
                id,
                award_name: format!("Award {id}"),
                award_desc: format!("Description {id}"),
                award_img: None,
            })
            .collect();
        Self {
            definitions,
            ..Default::default()
        }
    }

    /// Inserting `award_id` fails as a storage error.
    pub fn failing_on(mut self, award_id: i32) -> Self {
        self.failing_award = Some(award_id);
        self
    }

    pub fn granted_ids(&self, user_id: Uuid) -> Vec<i32> {
        let mut ids: Vec<i32> = self
            .grants
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id)
            .map(|g| g.award_id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl AwardStore for InMemoryAwards {
    async fn list_definitions(&self) -> Result<Vec<AwardDefinitionRow>, sqlx::Error> {
        Ok(self.definitions.clone())
    }

    async fn list_grants(&self, user_id: Uuid) -> Result<Vec<AwardGrantRow>, sqlx::Error> {
        Ok(self
            .grants
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_grant(&self, user_id: Uuid, award_id: i32) -> Result<bool, sqlx::Error> {
        if self.failing_award == Some(award_id) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        let mut grants = self.grants.lock().unwrap();
        if grants
            .iter()
            .any(|g| g.user_id == user_id && g.award_id == award_id)
        {
            return Ok(false);
        }
        grants.push(AwardGrantRow {
            user_id,
            award_id,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn list_earned(&self, user_id: Uuid) -> Result<Vec<EarnedAward>, sqlx::Error> {
        let grants = self.list_grants(user_id).await?;
        Ok(grants
            .into_iter()
            .filter_map(|grant| {
                self.definitions
                    .iter()
                    .find(|d| d.id == grant.award_id)
                    .map(|d| EarnedAward {
                        award_id: d.id,
                        award_name: d.award_name.clone(),
                        award_desc: d.award_desc.clone(),
                        award_img: d.award_img.clone(),
                        granted_at: grant.created_at,
                    })
            })
            .collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// App state
// ────────────────────────────────────────────────────────────────────────────

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/bookswipe_test".to_string(),
        catalog_base_url: "https://openlibrary.org".to_string(),
        covers_base_url: "https://covers.openlibrary.org".to_string(),
        catalog_timeout_secs: 5,
        discovery_max_attempts: 15,
        default_genre: "Science Fiction".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
    }
}

pub fn test_state(
    catalog: Arc<FakeCatalog>,
    history: Arc<InMemoryHistory>,
    awards: Arc<InMemoryAwards>,
    sampler: ScriptedSampler,
) -> AppState {
    AppState {
        catalog,
        history,
        awards,
        sampler: Arc::new(sampler),
        config: test_config(),
        shutdown: CancellationToken::new(),
    }
}
