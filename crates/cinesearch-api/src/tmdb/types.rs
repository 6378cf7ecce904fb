//! TMDB API response types and search parameters.

use serde::Deserialize;

/// Base URL for poster images (w500 rendition).
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Base URL for TMDB movie web pages.
const MOVIE_PAGE_BASE_URL: &str = "https://www.themoviedb.org/movie";

// --- Search Movie ---

/// One page of `search/movie` results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultPage {
    /// Current page number.
    pub page: u32,
    /// Search results, in server order.
    pub results: Vec<Movie>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

impl ResultPage {
    /// Returns `true` if the page carries no movies.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A single movie search result.
///
/// Fields are passed through from TMDB as-is. Everything except `id` and
/// `title` falls back to a default so one sparse record does not fail the
/// whole page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Release date (YYYY-MM-DD, empty string or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average (0.0 - 10.0).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Video flag.
    #[serde(default)]
    pub video: bool,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Search Parameters ---

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Response language (default: "en-US").
    pub language: String,
    /// Include adult content (default: false).
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            language: String::from("en-US"),
            include_adult: false,
        }
    }

    /// Sets the result page. Values below 1 are clamped to 1.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the adult content flag.
    #[must_use]
    pub const fn include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }

    /// Query-string pairs in the order TMDB documents them.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("include_adult", self.include_adult.to_string()),
            ("language", self.language.clone()),
        ]
    }
}

/// Full poster URL for a `poster_path` such as `/abc.jpg`.
#[must_use]
pub fn poster_url(poster_path: &str) -> String {
    format!("{IMAGE_BASE_URL}{poster_path}")
}

/// TMDB web page for a movie.
#[must_use]
pub fn movie_page_url(id: u64) -> String {
    format!("{MOVIE_PAGE_BASE_URL}/{id}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_sparse_movie() {
        // Arrange
        let json = r#"{"id":1,"title":"Untitled","release_date":"","poster_path":null}"#;

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.id, 1);
        assert_eq!(movie.title, "Untitled");
        assert_eq!(movie.release_date.as_deref(), Some(""));
        assert!(movie.poster_path.is_none());
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn test_parse_empty_page() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/search_movie_empty.json");

        // Act
        let page: ResultPage = serde_json::from_str(json).unwrap();

        // Assert
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn test_parse_batman_page() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/search_movie_batman.json");

        // Act
        let page: ResultPage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 12);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.results[0].title, "The Batman");
    }

    #[test]
    fn test_params_defaults() {
        // Arrange & Act
        let params = SearchMovieParams::new("batman");

        // Assert
        assert_eq!(params.page, 1);
        assert_eq!(params.language, "en-US");
        assert!(!params.include_adult);
    }

    #[test]
    fn test_params_page_clamped() {
        // Arrange & Act
        let params = SearchMovieParams::new("batman").page(0);

        // Assert
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_params_to_query() {
        // Arrange
        let params = SearchMovieParams::new("batman").page(3);

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(
            query,
            vec![
                ("query", String::from("batman")),
                ("page", String::from("3")),
                ("include_adult", String::from("false")),
                ("language", String::from("en-US")),
            ]
        );
    }

    #[test]
    fn test_urls() {
        // Arrange & Act & Assert
        assert_eq!(
            poster_url("/74xTEgt7R36Fpooo50r9T25onhq.jpg"),
            "https://image.tmdb.org/t/p/w500/74xTEgt7R36Fpooo50r9T25onhq.jpg"
        );
        assert_eq!(
            movie_page_url(414_906),
            "https://www.themoviedb.org/movie/414906"
        );
    }
}
