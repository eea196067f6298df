//! Discovery engine.
//!
//! Samples random offsets into a catalog category until it finds a work that
//! has a cover and is not in the user's history. Attempts run strictly one
//! after another; each one issues a count query, then a single-item query.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::genres::resolve_slug;
use crate::catalog::{CatalogError, CatalogItem, CatalogSource};
use crate::discovery::OffsetSampler;
use crate::history::InteractionStore;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 15;

/// Shown when a category runs out of unseen works.
pub const EXHAUSTED_MESSAGE: &str = "No more books available in this genre :(";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiscoveryOutcome {
    Found { item: CatalogItem, attempts: u32 },
    /// Every attempt came back empty, seen, coverless or failed.
    Exhausted { attempts: u32 },
    /// The caller went away; `attempts` counts the attempts that completed.
    Cancelled { attempts: u32 },
}

impl DiscoveryOutcome {
    pub fn item(&self) -> Option<&CatalogItem> {
        match self {
            DiscoveryOutcome::Found { item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            DiscoveryOutcome::Found { attempts, .. }
            | DiscoveryOutcome::Exhausted { attempts }
            | DiscoveryOutcome::Cancelled { attempts } => *attempts,
        }
    }
}

/// Looks for one unseen work under `slug`, trying at most `max_attempts` times.
///
/// Transient catalog failures consume an attempt and the loop carries on.
/// A malformed catalog payload aborts the search with the error.
pub async fn find_new_item(
    seen: &HashSet<String>,
    slug: &str,
    catalog: &dyn CatalogSource,
    sampler: &dyn OffsetSampler,
    max_attempts: u32,
    cancel: &CancellationToken,
) -> Result<DiscoveryOutcome, CatalogError> {
    for attempt in 1..=max_attempts {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Discovery for '{slug}' cancelled before attempt {attempt}");
                return Ok(DiscoveryOutcome::Cancelled { attempts: attempt - 1 });
            }
            result = sample_once(seen, slug, catalog, sampler) => result,
        };

        match result {
            Ok(Some(item)) => {
                debug!(
                    "Found {} for '{slug}' on attempt {attempt}",
                    item.external_id
                );
                return Ok(DiscoveryOutcome::Found {
                    item,
                    attempts: attempt,
                });
            }
            Ok(None) => debug!("Attempt {attempt} for '{slug}' found nothing new"),
            Err(e) if e.is_transient() => {
                warn!("Discovery attempt {attempt} for '{slug}' failed: {e}");
            }
            Err(e) => return Err(e),
        }
    }

    info!("Discovery for '{slug}' exhausted after {max_attempts} attempts");
    Ok(DiscoveryOutcome::Exhausted {
        attempts: max_attempts,
    })
}

async fn sample_once(
    seen: &HashSet<String>,
    slug: &str,
    catalog: &dyn CatalogSource,
    sampler: &dyn OffsetSampler,
) -> Result<Option<CatalogItem>, CatalogError> {
    let total = catalog.category_item_count(slug).await?;
    if total == 0 {
        return Ok(None);
    }

    let offset = sampler.sample(total);
    let items = catalog.items_at_offset(slug, offset, 1).await?;

    Ok(items
        .into_iter()
        .find(CatalogItem::has_cover)
        .filter(|item| !seen.contains(&item.external_id)))
}

/// Finds the next unseen work in `genre` for `user_id`.
///
/// A nil user has no history to check against, so nothing is offered. A
/// failed history lookup is treated as an empty history.
pub async fn discover(
    history: &dyn InteractionStore,
    catalog: &dyn CatalogSource,
    sampler: &dyn OffsetSampler,
    user_id: Uuid,
    genre: &str,
    max_attempts: u32,
    cancel: &CancellationToken,
) -> Result<DiscoveryOutcome, CatalogError> {
    if user_id.is_nil() {
        warn!("Discovery requested without a user; skipping");
        return Ok(DiscoveryOutcome::Exhausted { attempts: 0 });
    }

    let seen = match history.seen_external_ids(user_id).await {
        Ok(seen) => seen,
        Err(e) => {
            warn!("Error fetching history for user {user_id}: {e}");
            HashSet::new()
        }
    };

    let slug = resolve_slug(genre);
    find_new_item(&seen, &slug, catalog, sampler, max_attempts, cancel).await
}
