//! Wire shapes of the Open Library JSON API.

use serde::Deserialize;

use super::{normalize_work_key, CatalogItem, ItemDetail};

/// `/subjects/{slug}.json`
#[derive(Debug, Deserialize)]
pub struct SubjectDto {
    pub work_count: Option<u64>,
    #[serde(default)]
    pub works: Vec<SubjectWorkDto>,
}

#[derive(Debug, Deserialize)]
pub struct SubjectWorkDto {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<AuthorDto>,
    pub cover_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorDto {
    pub name: String,
}

impl From<SubjectWorkDto> for CatalogItem {
    fn from(work: SubjectWorkDto) -> Self {
        CatalogItem {
            external_id: normalize_work_key(&work.key).to_string(),
            title: work.title,
            creators: work.authors.into_iter().map(|a| a.name).collect(),
            cover_id: work.cover_id.filter(|id| *id > 0),
        }
    }
}

/// `/works/{id}.json`
#[derive(Debug, Deserialize)]
pub struct WorkDetailDto {
    pub description: Option<DescriptionDto>,
    #[serde(default)]
    pub covers: Vec<i64>,
}

/// The catalog stores descriptions either as a bare string or as a typed text
/// object (`{"type": "/type/text", "value": "..."}`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DescriptionDto {
    Text(String),
    Typed { value: String },
}

impl DescriptionDto {
    pub fn into_text(self) -> String {
        match self {
            DescriptionDto::Text(text) => text,
            DescriptionDto::Typed { value } => value,
        }
    }
}

impl WorkDetailDto {
    pub fn into_detail(self, external_id: &str) -> ItemDetail {
        ItemDetail {
            external_id: external_id.to_string(),
            description: self
                .description
                .map(DescriptionDto::into_text)
                .filter(|text| !text.trim().is_empty()),
            // The catalog uses -1 as a placeholder for removed covers.
            cover_ids: self.covers.into_iter().filter(|id| *id > 0).collect(),
        }
    }
}

/// `/works/{id}/editions.json`
#[derive(Debug, Deserialize)]
pub struct EditionsDto {
    #[serde(default)]
    pub entries: Vec<EditionDto>,
}

#[derive(Debug, Deserialize)]
pub struct EditionDto {
    #[serde(default)]
    pub isbn_13: Vec<String>,
}

impl EditionsDto {
    pub fn first_isbn13(self) -> Option<String> {
        self.entries
            .into_iter()
            .next()
            .and_then(|edition| edition.isbn_13.into_iter().next())
    }
}
