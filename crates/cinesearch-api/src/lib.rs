//! API client library for cinesearch.
//!
//! Provides the TMDB movie search client.

/// TMDB API client.
pub mod tmdb;
