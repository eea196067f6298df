//! Catalog — the single point of entry for book metadata lookups.
//!
//! All catalog reads go through the `CatalogSource` trait. The production
//! backend is `OpenLibraryClient`; tests swap in an in-memory catalog.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod dto;
pub mod genres;
pub mod handlers;
pub mod open_library;

pub use open_library::OpenLibraryClient;

/// Shown wherever a work has no description in the catalog.
pub const NO_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned status {status} for {path}")]
    Status { status: u16, path: String },

    #[error("Malformed catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// Transport failures and non-2xx statuses are worth another attempt.
    /// A payload that does not decode will not get better on retry.
    pub fn is_transient(&self) -> bool {
        !matches!(self, CatalogError::Decode(_))
    }
}

/// One discoverable work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub external_id: String,
    pub title: String,
    /// Ordered; the first entry is the primary creator.
    #[serde(default)]
    pub creators: Vec<String>,
    pub cover_id: Option<i64>,
}

impl CatalogItem {
    pub fn primary_creator(&self) -> Option<&str> {
        self.creators.first().map(String::as_str)
    }

    /// Only positive ids point at an image; 0 and -1 are catalog placeholders.
    pub fn has_cover(&self) -> bool {
        matches!(self.cover_id, Some(id) if id > 0)
    }

    pub fn cover_url(&self, covers_base_url: &str) -> Option<String> {
        self.cover_id
            .filter(|id| *id > 0)
            .map(|id| cover_url(covers_base_url, id))
    }
}

/// Extended metadata for a single work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub external_id: String,
    pub description: Option<String>,
    pub cover_ids: Vec<i64>,
}

impl ItemDetail {
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Total number of works filed under a category slug. Zero when unknown.
    async fn category_item_count(&self, slug: &str) -> Result<u64, CatalogError>;

    async fn items_at_offset(
        &self,
        slug: &str,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<CatalogItem>, CatalogError>;

    async fn item_detail(&self, external_id: &str) -> Result<ItemDetail, CatalogError>;

    /// ISBN-13 of the first listed edition, if the catalog knows one.
    async fn first_isbn13(&self, external_id: &str) -> Result<Option<String>, CatalogError>;
}

/// Strips the `/works/` prefix the catalog puts on work keys.
pub fn normalize_work_key(key: &str) -> &str {
    key.strip_prefix("/works/").unwrap_or(key)
}

/// True for bare work ids of the form `OL<digits>W`. Anything else could
/// address a different catalog path once spliced into a URL.
pub fn is_work_id(id: &str) -> bool {
    id.strip_prefix("OL")
        .and_then(|rest| rest.strip_suffix('W'))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

pub fn cover_url(covers_base_url: &str, cover_id: i64) -> String {
    format!(
        "{}/b/id/{}-L.jpg",
        covers_base_url.trim_end_matches('/'),
        cover_id
    )
}

pub fn work_url(catalog_base_url: &str, external_id: &str) -> String {
    format!(
        "{}/works/{}",
        catalog_base_url.trim_end_matches('/'),
        external_id
    )
}
