//! The persisted favorite record.

use chrono::NaiveDate;
use data_loader::MovieRecord;
use serde::{Deserialize, Serialize};
use sync_client::SheetRow;

/// One favorited movie, as stored under the favorites key.
///
/// Serialized camelCase with `dateAdded` as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub movie_title: String,
    pub date_added: NaiveDate,
    pub rating: f32,
    pub year: i32,
}

impl FavoriteEntry {
    /// Snapshot `movie` as favorited on `date_added`
    pub fn from_movie(movie: &MovieRecord, date_added: NaiveDate) -> Self {
        Self {
            movie_title: movie.title.clone(),
            date_added,
            rating: movie.rating,
            year: movie.year,
        }
    }

    /// The flat row mirrored to the remote sheet:
    /// `[dateAdded, movieTitle, year, rating]`
    pub fn to_sheet_row(&self) -> SheetRow {
        // Go through the shortest decimal form so 8.3 stays 8.3 as f64
        let rating: f64 = self
            .rating
            .to_string()
            .parse()
            .unwrap_or_else(|_| f64::from(self.rating));

        vec![
            self.date_added.format("%Y-%m-%d").to_string().into(),
            self.movie_title.clone().into(),
            self.year.into(),
            rating.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> FavoriteEntry {
        let movie = MovieRecord::new("movie-3", "Heat", 1995, &["Crime"], 8.3);
        FavoriteEntry::from_movie(&movie, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["movieTitle"], "Heat");
        assert_eq!(json["dateAdded"], "2026-10-17");
        assert_eq!(json["year"], 1995);
    }

    #[test]
    fn test_sheet_row_order() {
        assert_eq!(
            sample().to_sheet_row(),
            vec![json!("2026-10-17"), json!("Heat"), json!(1995), json!(8.3)]
        );
    }
}
