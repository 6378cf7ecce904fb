//! Result cache and fetch orchestration for cinesearch.
//!
//! [`QueryClient`] keys search results by `(query, page)`, deduplicates
//! in-flight requests, keeps the previous page of the same query visible
//! while the next one loads, retries transport failures and discards
//! responses that no longer match the request they answered.

mod client;
mod config;
mod key;
mod observation;

#[allow(clippy::module_name_repetitions)]
pub use client::QueryClient;
#[allow(clippy::module_name_repetitions)]
pub use config::QueryConfig;
pub use key::QueryKey;
pub use observation::{FetchState, QueryObservation};
