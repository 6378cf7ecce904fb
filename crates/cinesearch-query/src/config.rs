//! `QueryConfig` - explicit request policy for [`crate::QueryClient`].

use std::time::Duration;

/// Request policy handed to the orchestrator at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct QueryConfig {
    /// Automatic retries after a transport failure (default: 1).
    pub retry: u32,
    /// Delay before each retry, multiplied by the attempt number (default: 1s).
    pub retry_delay: Duration,
    /// Refetch the current key when the terminal regains focus (default: false).
    pub refetch_on_focus: bool,
    /// How long an unused cache entry survives (default: 5 minutes).
    pub gc_time: Duration,
    /// Response language sent with every request (default: "en-US").
    pub language: String,
    /// Include adult titles (default: false).
    pub include_adult: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            retry: 1,
            retry_delay: Duration::from_secs(1),
            refetch_on_focus: false,
            gc_time: Duration::from_secs(300),
            language: String::from("en-US"),
            include_adult: false,
        }
    }
}
