//! Tabular export of a user's liked titles.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::interaction::InteractionRow;

/// Shown when the user has nothing to export.
pub const EMPTY_EXPORT_MESSAGE: &str = "You have no liked books to export.";

#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    external_id: &'a str,
    title: Option<&'a str>,
    author: Option<&'a str>,
}

/// Renders liked rows as CSV with an `external_id,title,author` header.
pub fn render_liked_csv(rows: &[InteractionRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(ExportRecord {
                external_id: &row.external_id,
                title: row.title.as_deref(),
                author: row.author.as_deref(),
            })
            .with_context(|| format!("Failed to write export row for {}", row.external_id))?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::Error::new(e.into_error()))
        .context("Failed to finish liked books export")
}

pub fn export_filename(date: chrono::NaiveDate) -> String {
    format!("liked-books-{}.csv", date.format("%Y-%m-%d"))
}
