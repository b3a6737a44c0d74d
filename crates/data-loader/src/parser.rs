//! Parser for header-row, comma-separated movie tables.
//!
//! Columns are located by header name (case-insensitive, with a few common
//! aliases), so column order does not matter and unknown columns are
//! ignored. Only the title column is required.

use crate::error::{LoadError, Result};
use crate::types::RawRow;
use tracing::warn;

/// Maps CSV column indices to row fields.
#[derive(Debug, Default)]
struct ColumnMap {
    title: Option<usize>,
    year: Option<usize>,
    runtime: Option<usize>,
    genres: Option<usize>,
    rating: Option<usize>,
    overview: Option<usize>,
    poster: Option<usize>,
}

impl ColumnMap {
    /// Creates a column map from CSV headers.
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let mut map = Self::default();

        for (i, header) in headers.iter().enumerate() {
            let slot = match header.trim().to_lowercase().as_str() {
                "title" | "series_title" | "name" => &mut map.title,
                "year" | "released_year" | "release_year" => &mut map.year,
                "runtime" => &mut map.runtime,
                "genre" | "genres" => &mut map.genres,
                "rating" | "imdb_rating" | "vote_average" => &mut map.rating,
                "overview" | "description" | "plot" => &mut map.overview,
                "poster" | "poster_link" | "poster_url" => &mut map.poster,
                _ => continue, // Ignore unknown columns
            };
            // First matching column wins
            slot.get_or_insert(i);
        }

        if map.title.is_none() {
            return Err(LoadError::MissingColumn {
                column: "title".to_string(),
            });
        }

        Ok(map)
    }

    fn extract(&self, record: &csv::StringRecord) -> RawRow {
        let get_field = |idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        RawRow {
            title: get_field(self.title),
            year: get_field(self.year),
            runtime: get_field(self.runtime),
            genres: get_field(self.genres),
            rating: get_field(self.rating),
            overview: get_field(self.overview),
            poster: get_field(self.poster),
        }
    }
}

/// Parse the raw table text into rows
///
/// Format: a header row followed by comma-separated records. Quoted fields
/// may contain commas (`"Crime, Drama"`). Records with more or fewer fields
/// than the header are accepted; missing cells read as `None`.
///
/// Fails only when the header row is unreadable or lacks a title column.
/// Individual records that cannot be decoded are skipped with a warning.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Parse {
            reason: format!("Unreadable header row: {}", e),
        })?
        .clone();
    let column_map = ColumnMap::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        match record {
            Ok(record) => rows.push(column_map.extract(&record)),
            Err(e) => {
                // Line numbers are 1-based and the header is line 1
                warn!("Skipping malformed record at line {}: {}", idx + 2, e);
            }
        }
    }

    Ok(rows)
}
