//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::FetchError;
use super::types::{ResultPage, SearchMovieParams};

/// Movie search API trait.
///
/// Abstracts the data client so the fetch orchestrator and tests can
/// substitute a mock. Uses `trait_variant::make` to generate a `Send`-bound
/// async trait; implement `MovieApi` to get `LocalMovieApi` for free.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Searches for movies. Issues exactly one HTTP request.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] on transport failure or timeout,
    /// [`FetchError::Api`] on a non-2xx response,
    /// [`FetchError::Decode`] when the body is not a result page and
    /// [`FetchError::Request`] when the request cannot be built.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<ResultPage, FetchError>;
}
