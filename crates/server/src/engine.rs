//! # Recommendation Engine
//!
//! Serves queries against the cached dataset:
//! 1. Make sure the dataset is loaded (one shared load per process)
//! 2. Filter by genre and decade
//! 3. Shuffle, seeded by language and offset when a language is given
//! 4. Stable sort by rating, highest first
//! 5. Cut out the requested page
//!
//! Query results are never cached; every call runs the pipeline over the
//! in-memory records.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use data_loader::{DatasetLoader, LoadError, MovieRecord};
use pipeline::filters::{DecadeFilter, GenreFilter, MinimumYearFilter, TRENDING_MIN_YEAR};
use pipeline::{paginate, rank, sort_by_rating_desc, FilterPipeline};
use sources::ShuffleMode;

use crate::messages::{recommendation_message, TRENDING_MESSAGE};

/// Page size when the caller gives none
pub const DEFAULT_LIMIT: usize = 6;

/// Size of the trending view
pub const TRENDING_LIMIT: usize = 12;

/// Criteria for `get_recommendations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationFilters {
    /// Substring matched case-insensitively against each genre
    pub genre: Option<String>,
    /// Any year inside the wanted decade
    pub year: Option<i32>,
    /// Only seeds the shuffle; records carry no language
    pub language: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for RecommendationFilters {
    fn default() -> Self {
        Self {
            genre: None,
            year: None,
            language: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl RecommendationFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Take the year from raw text. Leading digits are used ("1995s" is
    /// 1995); text without any leaves the year filter off.
    pub fn with_year_str(mut self, year: &str) -> Self {
        self.year = parse_leading_year(year);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Seeded by the first character of a non-empty language plus the
    /// offset, so each page of a "load more" sequence is reproducible.
    pub fn shuffle_mode(&self) -> ShuffleMode {
        match self.language.as_deref().and_then(|l| l.chars().next()) {
            Some(first) => {
                // Offsets past i64::MAX only ever produce empty pages
                let offset = i64::try_from(self.offset).unwrap_or(i64::MAX);
                ShuffleMode::Seeded(i64::from(u32::from(first)).wrapping_add(offset))
            }
            None => ShuffleMode::Ambient,
        }
    }

    fn pipeline(&self) -> FilterPipeline {
        let genre = self
            .genre
            .as_deref()
            .filter(|g| !g.trim().is_empty())
            .map(GenreFilter::new);

        FilterPipeline::new()
            .add_optional(genre)
            .add_optional(self.year.map(DecadeFilter::for_year))
    }
}

fn parse_leading_year(text: &str) -> Option<i32> {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let year = digits[..end].parse::<i64>().ok()?;
    i32::try_from(sign * year).ok()
}

/// Result of a query, serialized camelCase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub success: bool,
    pub movies: Vec<MovieRecord>,
    pub message: String,
    /// Matches before pagination
    pub total_results: usize,
}

impl RecommendationResponse {
    /// The response for a query whose first dataset load failed
    pub fn failure(err: &LoadError) -> Self {
        Self {
            success: false,
            movies: Vec::new(),
            message: format!("Failed to load movies: {}", err),
            total_results: 0,
        }
    }
}

/// Query engine over a shared dataset loader
#[derive(Clone)]
pub struct RecommendationEngine {
    loader: Arc<DatasetLoader>,
}

impl RecommendationEngine {
    pub fn new(loader: Arc<DatasetLoader>) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &Arc<DatasetLoader> {
        &self.loader
    }

    /// Filtered, shuffled, rating-sorted page of movies.
    ///
    /// Fails only when the dataset cannot be loaded. An empty match is a
    /// successful response with no movies.
    #[instrument(skip(self, filters), fields(genre = ?filters.genre, year = ?filters.year, offset = filters.offset))]
    pub async fn get_recommendations(
        &self,
        filters: &RecommendationFilters,
    ) -> Result<RecommendationResponse, LoadError> {
        let movies = self.loader.load_dataset().await?;

        let mut matches = filters.pipeline().apply(movies.iter().collect());
        let total_results = matches.len();

        rank(&mut matches, filters.shuffle_mode());
        let page: Vec<MovieRecord> = paginate(&matches, filters.offset, filters.limit)
            .iter()
            .map(|movie| (*movie).clone())
            .collect();

        debug!(
            "{} of {} movies matched, returning {}",
            total_results,
            movies.len(),
            page.len()
        );

        Ok(RecommendationResponse {
            success: true,
            movies: page,
            message: recommendation_message().to_string(),
            total_results,
        })
    }

    /// Top rated movies released in or after 2010
    #[instrument(skip(self))]
    pub async fn get_trending(&self) -> Result<RecommendationResponse, LoadError> {
        let movies = self.loader.load_dataset().await?;

        let mut recent = FilterPipeline::new()
            .add_filter(MinimumYearFilter::new(TRENDING_MIN_YEAR))
            .apply(movies.iter().collect());
        sort_by_rating_desc(&mut recent);

        let top: Vec<MovieRecord> = recent
            .into_iter()
            .take(TRENDING_LIMIT)
            .cloned()
            .collect();
        info!("Trending view has {} movies", top.len());

        Ok(RecommendationResponse {
            success: true,
            total_results: top.len(),
            movies: top,
            message: TRENDING_MESSAGE.to_string(),
        })
    }

    /// Case-insensitive exact title lookup
    pub async fn find_by_title(&self, title: &str) -> Result<Option<MovieRecord>, LoadError> {
        let movies = self.loader.load_dataset().await?;
        let wanted = title.trim().to_lowercase();

        Ok(movies
            .iter()
            .find(|movie| movie.title.to_lowercase() == wanted)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::RECOMMENDATION_MESSAGES;
    use data_loader::{build_records, FileSource};

    // ============================================================================
    // Test Helpers
    // ============================================================================

    fn build_test_engine(csv: &str) -> RecommendationEngine {
        let records = build_records(csv).expect("test table should parse");
        RecommendationEngine::new(Arc::new(DatasetLoader::preloaded(records)))
    }

    fn scenario_engine() -> RecommendationEngine {
        build_test_engine(
            "title,year,genre,rating\n\
             A,1994,Drama,8.5\n\
             B,1999,Comedy,7.0\n\
             C,2015,Comedy,9.0\n",
        )
    }

    fn wide_engine() -> RecommendationEngine {
        let mut csv = String::from("title,year,genre,rating\n");
        for i in 0..30 {
            // Ratings repeat so ties exist for the shuffle to reorder
            csv.push_str(&format!("M{},{},\"Comedy, Drama\",{}\n", i, 2000 + i, 5 + i % 3));
        }
        csv.push_str("Old,1985,Comedy,9.9\n");
        build_test_engine(&csv)
    }

    fn titles(response: &RecommendationResponse) -> Vec<&str> {
        response.movies.iter().map(|m| m.title.as_str()).collect()
    }

    // ============================================================================
    // get_recommendations
    // ============================================================================

    #[tokio::test]
    async fn test_genre_scenario() {
        let engine = scenario_engine();

        let filters = RecommendationFilters::new().with_genre("Comedy").with_limit(10);
        let response = engine.get_recommendations(&filters).await.unwrap();

        assert!(response.success);
        assert_eq!(titles(&response), vec!["C", "B"]);
        assert_eq!(response.total_results, 2);
        assert!(RECOMMENDATION_MESSAGES.contains(&response.message.as_str()));
    }

    #[tokio::test]
    async fn test_decade_scenario() {
        let engine = scenario_engine();

        let filters = RecommendationFilters::new().with_year(1995);
        let response = engine.get_recommendations(&filters).await.unwrap();

        assert_eq!(titles(&response), vec!["A", "B"]);
        assert_eq!(response.total_results, 2);
    }

    #[tokio::test]
    async fn test_no_match_is_success() {
        let engine = scenario_engine();

        let filters = RecommendationFilters::new().with_genre("Western");
        let response = engine.get_recommendations(&filters).await.unwrap();

        assert!(response.success);
        assert!(response.movies.is_empty());
        assert_eq!(response.total_results, 0);
    }

    #[tokio::test]
    async fn test_offset_past_end() {
        let engine = scenario_engine();

        let filters = RecommendationFilters::new().with_offset(5).with_limit(6);
        let response = engine.get_recommendations(&filters).await.unwrap();

        assert!(response.success);
        assert!(response.movies.is_empty());
        assert_eq!(response.total_results, 3);
    }

    #[tokio::test]
    async fn test_huge_offset_with_language_is_empty_page() {
        let engine = scenario_engine();

        for offset in [i64::MAX as usize, usize::MAX] {
            let filters = RecommendationFilters::new()
                .with_language("z")
                .with_genre("Drama")
                .with_offset(offset);
            let response = engine.get_recommendations(&filters).await.unwrap();

            assert!(response.success);
            assert!(response.movies.is_empty());
            assert_eq!(response.total_results, 1);
        }
    }

    #[tokio::test]
    async fn test_extreme_years_are_empty_pages() {
        let engine = scenario_engine();

        for year in ["2147483647", "-2147483648", "-2147483647"] {
            let filters = RecommendationFilters::new().with_year_str(year);
            let response = engine.get_recommendations(&filters).await.unwrap();

            assert!(response.success);
            assert!(response.movies.is_empty());
        }

        let filters = RecommendationFilters::new().with_year(i32::MIN);
        let response = engine.get_recommendations(&filters).await.unwrap();
        assert_eq!(response.total_results, 0);
    }

    #[tokio::test]
    async fn test_page_properties() {
        let engine = wide_engine();

        let filters = RecommendationFilters::new()
            .with_genre("drama")
            .with_year_str("2009")
            .with_limit(4);
        let response = engine.get_recommendations(&filters).await.unwrap();

        assert_eq!(response.total_results, 10);
        assert_eq!(response.movies.len(), 4);
        for movie in &response.movies {
            assert!((2000..=2009).contains(&movie.year));
            assert!(movie.has_genre_like("drama"));
        }
        assert!(response.movies.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[tokio::test]
    async fn test_language_pages_are_reproducible() {
        let engine = wide_engine();

        for offset in [0, 6, 12] {
            let filters = RecommendationFilters::new()
                .with_language("en")
                .with_offset(offset);

            let first = engine.get_recommendations(&filters).await.unwrap();
            let second = engine.get_recommendations(&filters).await.unwrap();
            assert_eq!(titles(&first), titles(&second));
        }
    }

    #[tokio::test]
    async fn test_unparsable_year_is_ignored() {
        let engine = scenario_engine();

        let filters = RecommendationFilters::new().with_year_str("soon");
        assert_eq!(filters.year, None);

        let response = engine.get_recommendations(&filters).await.unwrap();
        assert_eq!(response.total_results, 3);
    }

    #[tokio::test]
    async fn test_blank_genre_is_ignored() {
        let engine = scenario_engine();

        let filters = RecommendationFilters::new().with_genre("  ");
        let response = engine.get_recommendations(&filters).await.unwrap();
        assert_eq!(response.total_results, 3);
    }

    #[tokio::test]
    async fn test_load_failure() {
        let loader = DatasetLoader::new(Arc::new(FileSource::new("/nonexistent/movies.csv")));
        let engine = RecommendationEngine::new(Arc::new(loader));

        let err = engine
            .get_recommendations(&RecommendationFilters::default())
            .await
            .unwrap_err();
        let response = RecommendationResponse::failure(&err);

        assert!(!response.success);
        assert!(response.movies.is_empty());
        assert_eq!(response.total_results, 0);
        assert!(response.message.contains("/nonexistent/movies.csv"));
    }

    // ============================================================================
    // get_trending / find_by_title
    // ============================================================================

    #[tokio::test]
    async fn test_trending() {
        let engine = wide_engine();
        let response = engine.get_trending().await.unwrap();

        assert!(response.success);
        assert_eq!(response.message, TRENDING_MESSAGE);
        assert_eq!(response.movies.len(), TRENDING_LIMIT);
        assert!(response.movies.iter().all(|m| m.year >= 2010));
        assert!(response.movies.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[tokio::test]
    async fn test_trending_scenario() {
        let engine = scenario_engine();
        let response = engine.get_trending().await.unwrap();
        assert_eq!(titles(&response), vec!["C"]);
    }

    #[tokio::test]
    async fn test_find_by_title() {
        let engine = scenario_engine();

        let found = engine.find_by_title(" c ").await.unwrap();
        assert_eq!(found.map(|m| m.year), Some(2015));
        assert!(engine.find_by_title("Z").await.unwrap().is_none());
    }

    // ============================================================================
    // Filters and serialization
    // ============================================================================

    #[test]
    fn test_shuffle_mode_from_language() {
        let filters = RecommendationFilters::new().with_language("en").with_offset(6);
        assert_eq!(filters.shuffle_mode(), ShuffleMode::Seeded(101 + 6));

        assert_eq!(RecommendationFilters::new().shuffle_mode(), ShuffleMode::Ambient);
        assert_eq!(
            RecommendationFilters::new().with_language("").shuffle_mode(),
            ShuffleMode::Ambient
        );

        let far = RecommendationFilters::new().with_language("e").with_offset(usize::MAX);
        assert_eq!(far.shuffle_mode(), ShuffleMode::Seeded(101i64.wrapping_add(i64::MAX)));
    }

    #[test]
    fn test_parse_leading_year() {
        assert_eq!(parse_leading_year("1995"), Some(1995));
        assert_eq!(parse_leading_year(" 1995s "), Some(1995));
        assert_eq!(parse_leading_year("-5"), Some(-5));
        assert_eq!(parse_leading_year(""), None);
        assert_eq!(parse_leading_year("nineties"), None);
        assert_eq!(parse_leading_year("-2147483648"), Some(i32::MIN));
        assert_eq!(parse_leading_year("2147483648"), None);
    }

    #[test]
    fn test_filters_deserialize_with_defaults() {
        let filters: RecommendationFilters =
            serde_json::from_str(r#"{"genre":"Comedy","offset":6}"#).unwrap();
        assert_eq!(filters.genre.as_deref(), Some("Comedy"));
        assert_eq!(filters.limit, DEFAULT_LIMIT);
        assert_eq!(filters.offset, 6);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = RecommendationResponse {
            success: true,
            movies: Vec::new(),
            message: "hi".to_string(),
            total_results: 0,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalResults"], 0);
        assert_eq!(json["success"], true);
    }
}
