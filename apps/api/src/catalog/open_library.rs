//! Reqwest-backed Open Library adapter.
//!
//! Owns transport details only: URL building, timeouts, status mapping and
//! JSON decoding into catalog types.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{EditionsDto, SubjectDto, WorkDetailDto};
use super::{CatalogError, CatalogItem, CatalogSource, ItemDetail};

const USER_AGENT: &str = concat!("bookswipe-api/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct OpenLibraryClient {
    client: Client,
    base_url: String,
}

impl OpenLibraryClient {
    /// Builds a client with an explicit per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Catalog returned {status} for {path}");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response.bytes().await?;
        debug!("Catalog GET {path} -> {} bytes", body.len());
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogSource for OpenLibraryClient {
    async fn category_item_count(&self, slug: &str) -> Result<u64, CatalogError> {
        let subject: SubjectDto = self
            .get_json(&subject_path(slug), &[("limit", "1".to_string())])
            .await?;
        Ok(subject.work_count.unwrap_or(0))
    }

    async fn items_at_offset(
        &self,
        slug: &str,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let subject: SubjectDto = self
            .get_json(
                &subject_path(slug),
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            )
            .await?;
        Ok(subject.works.into_iter().map(CatalogItem::from).collect())
    }

    async fn item_detail(&self, external_id: &str) -> Result<ItemDetail, CatalogError> {
        let work: WorkDetailDto = self
            .get_json(&format!("/works/{external_id}.json"), &[])
            .await?;
        Ok(work.into_detail(external_id))
    }

    async fn first_isbn13(&self, external_id: &str) -> Result<Option<String>, CatalogError> {
        let editions: EditionsDto = self
            .get_json(
                &format!("/works/{external_id}/editions.json"),
                &[("limit", "1".to_string())],
            )
            .await?;
        Ok(editions.first_isbn13())
    }
}

fn subject_path(slug: &str) -> String {
    format!("/subjects/{slug}.json")
}
