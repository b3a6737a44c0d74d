//! Maps raw rows onto canonical movie records.
//!
//! Every field is defaulted independently, so a bad cell never costs the
//! rest of the row. Numbers are read from their leading numeric prefix,
//! which keeps values like `"1994 (USA)"` or `"142 min"` usable.

use crate::types::*;

/// Normalize one row into a `MovieRecord`.
///
/// The caller is expected to have dropped rows without a title already
/// (see `RawRow::has_title`); a missing title here becomes an empty string.
/// The id depends on `index` alone so reloading an unchanged source yields
/// the same ids.
pub fn normalize(row: RawRow, index: usize) -> MovieRecord {
    MovieRecord {
        id: movie_id(index),
        title: row.title.map(|t| t.trim().to_string()).unwrap_or_default(),
        year: row
            .year
            .as_deref()
            .and_then(leading_int)
            .unwrap_or(DEFAULT_YEAR),
        runtime: non_blank(row.runtime).unwrap_or_else(|| DEFAULT_RUNTIME.to_string()),
        genres: row.genres.as_deref().map(split_genres).unwrap_or_default(),
        rating: row
            .rating
            .as_deref()
            .and_then(leading_float)
            .unwrap_or(DEFAULT_RATING),
        overview: non_blank(row.overview).unwrap_or_else(|| DEFAULT_OVERVIEW.to_string()),
        poster: non_blank(row.poster).unwrap_or_else(|| DEFAULT_POSTER.to_string()),
    }
}

/// Id assigned to the record at `index`
pub fn movie_id(index: usize) -> MovieId {
    format!("movie-{}", index)
}

/// Split a comma-joined genre list
///
/// Example: "Crime, Drama" -> vec!["Crime", "Drama"]
///          "   "          -> vec![]
pub fn split_genres(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the integer at the start of `s`
///
/// Example: "1994"       -> Some(1994)
///          "1994 (USA)" -> Some(1994)
///          "PG"         -> None
fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Parse the float at the start of `s`
///
/// Example: "8.5"    -> Some(8.5)
///          "8.5/10" -> Some(8.5)
///          ".5"     -> Some(0.5)
///          "n/a"    -> None
fn leading_float(s: &str) -> Option<f32> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['-', '+']));
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}
