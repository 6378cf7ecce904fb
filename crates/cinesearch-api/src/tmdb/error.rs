//! Fetch error taxonomy.

/// Failure of a single search request.
///
/// `Clone` so the orchestrator can keep the last error in its cache and
/// hand copies to observers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Connection failure, timeout, or an interrupted body read.
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response, including authentication failures.
    #[error("TMDB API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the TMDB error body, or the raw body.
        message: String,
    },
    /// A 2xx response whose body is not a valid result page.
    #[error("malformed TMDB response: {0}")]
    Decode(String),
    /// The request could not be built locally (bad URL or a token that is
    /// not a valid header value). Nothing was sent.
    #[error("invalid TMDB request: {0}")]
    Request(String),
}

impl FetchError {
    /// Returns `true` for transport-level failures, the only kind worth retrying.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Builds a `Network` error from a `reqwest` failure.
    pub(crate) fn network(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            "timed out"
        } else if err.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        Self::Network(format!("{kind}: {err}"))
    }
}
