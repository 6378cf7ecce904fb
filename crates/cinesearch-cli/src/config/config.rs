//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cinesearch_query::QueryConfig;
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level application configuration. Every field is optional in the file.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB request settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Fetch orchestration policy.
    #[serde(default)]
    pub query: QuerySettings,
    /// Terminal UI settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// TMDB request settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// API base URL. `None` uses the public TMDB v3 endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Response language.
    pub language: String,
    /// Include adult titles.
    pub include_adult: bool,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            language: String::from("en-US"),
            include_adult: false,
            timeout_secs: 10,
        }
    }
}

/// Fetch orchestration policy, mirrored into [`QueryConfig`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuerySettings {
    /// Automatic retries after a transport failure.
    pub retry: u32,
    /// Base delay before a retry, in milliseconds.
    pub retry_delay_ms: u64,
    /// Refetch the current page when the terminal regains focus.
    pub refetch_on_focus: bool,
    /// Lifetime of unused cache entries, in seconds.
    pub gc_time_secs: u64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            retry: 1,
            retry_delay_ms: 1000,
            refetch_on_focus: false,
            gc_time_secs: 300,
        }
    }
}

/// Terminal UI settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// How long a toast notification stays on screen, in seconds.
    pub toast_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { toast_secs: 4 }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Serializes the config as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config to TOML")
    }

    /// Parsed API base URL override, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `tmdb.base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.tmdb
            .base_url
            .as_deref()
            .map(|raw| {
                // A missing trailing slash would make `join` drop the last path segment.
                let normalized = if raw.ends_with('/') {
                    String::from(raw)
                } else {
                    format!("{raw}/")
                };
                Url::parse(&normalized).with_context(|| format!("invalid tmdb.base_url: {raw}"))
            })
            .transpose()
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.tmdb.timeout_secs)
    }

    /// Toast lifetime.
    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.ui.toast_secs)
    }

    /// Request policy for the fetch orchestrator.
    #[must_use]
    pub fn query_config(&self) -> QueryConfig {
        QueryConfig {
            retry: self.query.retry,
            retry_delay: Duration::from_millis(self.query.retry_delay_ms),
            refetch_on_focus: self.query.refetch_on_focus,
            gc_time: Duration::from_secs(self.query.gc_time_secs),
            language: self.tmdb.language.clone(),
            include_adult: self.tmdb.include_adult,
        }
    }
}
