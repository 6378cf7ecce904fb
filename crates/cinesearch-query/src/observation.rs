//! What an observer sees for the active key.

use std::sync::Arc;

use cinesearch_api::tmdb::{FetchError, ResultPage};

/// Fetch state of one key, derived from the cache on every observation.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum FetchState {
    /// Fetching is disabled (empty query) or nothing is active.
    Idle,
    /// A request is in flight and there is nothing to show yet.
    Pending,
    /// Data is available.
    Success(Arc<ResultPage>),
    /// The last attempt for this key failed.
    Error(FetchError),
}

/// Snapshot of the active key handed to the coordinator.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct QueryObservation {
    /// Derived fetch state.
    pub state: FetchState,
    /// `true` when `state` carries the previous page of the same query.
    pub is_placeholder: bool,
    /// `true` while a request for the active key is in flight.
    pub is_fetching: bool,
}

impl QueryObservation {
    /// Observation for a disabled key.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            state: FetchState::Idle,
            is_placeholder: false,
            is_fetching: false,
        }
    }

    /// Returns `true` if nothing is active.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, FetchState::Idle)
    }

    /// In flight with no cached or placeholder data.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, FetchState::Pending)
    }

    /// Data is available, possibly as a placeholder.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.state, FetchState::Success(_))
    }

    /// The last attempt for the active key failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.state, FetchState::Error(_))
    }

    /// The page to render, if any.
    #[must_use]
    pub fn data(&self) -> Option<&ResultPage> {
        match &self.state {
            FetchState::Success(page) => Some(page.as_ref()),
            _ => None,
        }
    }

    /// The error, if the active key failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match &self.state {
            FetchState::Error(err) => Some(err),
            _ => None,
        }
    }
}
