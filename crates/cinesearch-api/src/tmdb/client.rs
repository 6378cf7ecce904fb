//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::MovieApi;
use super::error::FetchError;
use super::types::{ResultPage, SearchMovieParams, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token. `None` sends no `Authorization` header.
    api_token: Option<String>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token.
    ///
    /// Optional: without a token the request goes out unauthenticated and
    /// the server's 401 is reported as [`FetchError::Api`].
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token: self.api_token.filter(|t| !t.trim().is_empty()),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns `true` if a bearer token is configured.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.api_token.is_some()
    }

    /// Sends one GET request with Bearer auth and query params.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::Request(format!("failed to join URL path {path}: {e}")))?;

        let mut builder = self.http_client.get(url).query(query);
        if let Some(ref token) = self.api_token {
            builder = builder.bearer_auth(token);
        }
        let request = builder
            .build()
            .map_err(|e| FetchError::Request(format!("failed to build request {path}: {e}")))?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| FetchError::network(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| FetchError::network(&e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<TmdbErrorResponse>(&body).map_or(body, |err| {
                format!("code={}, message={}", err.status_code, err.status_message)
            });
            tracing::warn!(status = status.as_u16(), %message, "TMDB API error");
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| FetchError::Decode(format!("failed to decode JSON response {path}: {e}")))
    }
}

impl MovieApi for TmdbClient {
    #[instrument(skip_all, fields(query = %params.query, page = params.page))]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<ResultPage, FetchError> {
        let query = params.to_query();
        self.get_json("search/movie", &query).await
    }
}
