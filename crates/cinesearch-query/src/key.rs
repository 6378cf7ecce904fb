//! Cache key.

use cinesearch_api::tmdb::SearchMovieParams;

use crate::QueryConfig;

/// Identifies one result page: the submitted query text and a 1-based page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Query text. Empty disables fetching.
    pub query: String,
    /// Page number, never below 1.
    pub page: u32,
}

impl QueryKey {
    /// Creates a key. A page of 0 is stored as 1.
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page: page.max(1),
        }
    }

    /// Fetching is only enabled for a non-empty query.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.query.is_empty()
    }

    /// Returns `true` if both keys refer to the same query text.
    #[must_use]
    pub fn same_query(&self, other: &Self) -> bool {
        self.query == other.query
    }

    /// Request parameters for this key.
    #[must_use]
    pub fn to_params(&self, config: &QueryConfig) -> SearchMovieParams {
        SearchMovieParams::new(self.query.clone())
            .page(self.page)
            .language(config.language.clone())
            .include_adult(config.include_adult)
    }
}
