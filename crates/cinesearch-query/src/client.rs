//! `QueryClient` - keyed result cache with in-flight request tracking.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use cinesearch_api::tmdb::{FetchError, MovieApi, ResultPage, SearchMovieParams};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::{FetchState, QueryConfig, QueryKey, QueryObservation};

/// Outcome of one spawned request, tagged with the key and id it answers.
#[derive(Debug)]
struct Completion {
    key: QueryKey,
    request_id: u64,
    outcome: Result<ResultPage, FetchError>,
}

/// Cached state of one key.
#[derive(Debug)]
struct CacheEntry {
    /// Last settled outcome. `None` until the first request settles.
    outcome: Option<Result<Arc<ResultPage>, FetchError>>,
    /// Id of the request currently in flight for this key.
    in_flight: Option<u64>,
    /// Last time the key was activated.
    last_used: Instant,
}

impl CacheEntry {
    fn new(now: Instant) -> Self {
        Self {
            outcome: None,
            in_flight: None,
            last_used: now,
        }
    }

    fn data(&self) -> Option<Arc<ResultPage>> {
        match self.outcome {
            Some(Ok(ref page)) => Some(Arc::clone(page)),
            _ => None,
        }
    }
}

/// Fetch orchestrator.
///
/// Must be driven from inside a tokio runtime: requests run on spawned
/// tasks and their results come back through [`QueryClient::settled`].
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct QueryClient<A> {
    api: Arc<A>,
    config: QueryConfig,
    cache: HashMap<QueryKey, CacheEntry>,
    /// Key the coordinator currently looks at.
    active: Option<QueryKey>,
    /// Most recent successful page shown to the observer.
    placeholder: Option<(QueryKey, Arc<ResultPage>)>,
    next_request_id: u64,
    completion_tx: UnboundedSender<Completion>,
    completion_rx: UnboundedReceiver<Completion>,
}

impl<A> QueryClient<A>
where
    A: MovieApi + Send + Sync + 'static,
{
    /// Creates an orchestrator over the given data client.
    pub fn new(api: A, config: QueryConfig) -> Self {
        Self::from_shared(Arc::new(api), config)
    }

    /// Creates an orchestrator over a shared data client.
    pub fn from_shared(api: Arc<A>, config: QueryConfig) -> Self {
        let (completion_tx, completion_rx) = unbounded_channel();
        Self {
            api,
            config,
            cache: HashMap::new(),
            active: None,
            placeholder: None,
            next_request_id: 0,
            completion_tx,
            completion_rx,
        }
    }

    /// Request policy in use.
    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Currently active key.
    #[must_use]
    pub const fn active(&self) -> Option<&QueryKey> {
        self.active.as_ref()
    }

    /// Number of cached keys.
    #[must_use]
    pub fn cached_keys(&self) -> usize {
        self.cache.len()
    }

    /// Makes `key` the active key and fetches it if needed.
    ///
    /// No request is issued when the query is empty, when the key already
    /// has data, or when a request for it is in flight. A key whose last
    /// attempt failed is fetched again when it becomes active again.
    pub fn activate(&mut self, key: QueryKey) {
        let changed = self.active.as_ref() != Some(&key);
        if changed {
            if let Some(prev) = self.active.take()
                && let Some(data) = self.cache.get(&prev).and_then(CacheEntry::data)
            {
                self.placeholder = Some((prev, data));
            }
            self.active = Some(key.clone());
            self.collect_garbage();
        }

        if !key.is_enabled() {
            return;
        }

        let now = Instant::now();
        let entry = self
            .cache
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(now));
        entry.last_used = now;

        let needs_fetch = entry.in_flight.is_none()
            && match entry.outcome {
                None => true,
                Some(Ok(_)) => false,
                Some(Err(_)) => changed,
            };

        if needs_fetch {
            self.start_fetch(key);
        } else {
            tracing::debug!(query = %key.query, page = key.page, "cache hit or request in flight");
        }
    }

    /// Forces a new request for `key` unless one is already in flight.
    ///
    /// Cached data stays visible while the refetch runs.
    pub fn refetch(&mut self, key: &QueryKey) {
        if !key.is_enabled() {
            return;
        }
        if self.cache.get(key).is_some_and(|e| e.in_flight.is_some()) {
            return;
        }
        self.start_fetch(key.clone());
    }

    /// Handles the terminal regaining focus.
    ///
    /// Refetches the active key only when `refetch_on_focus` is enabled.
    pub fn on_focus_gained(&mut self) {
        if !self.config.refetch_on_focus {
            return;
        }
        if let Some(key) = self.active.clone() {
            tracing::debug!(query = %key.query, page = key.page, "refetch on focus");
            self.refetch(&key);
        }
    }

    /// Waits for the next request to settle and records it.
    ///
    /// Returns the key whose entry changed. Completions that no longer
    /// match their key's in-flight request are discarded and waiting
    /// continues. Pending forever while nothing is in flight, so it is
    /// safe to use as a `select!` branch.
    pub async fn settled(&mut self) -> Option<QueryKey> {
        loop {
            let completion = self.completion_rx.recv().await?;
            if let Some(key) = self.apply(completion) {
                return Some(key);
            }
        }
    }

    /// Records every completion that has already arrived, without waiting.
    ///
    /// Returns the number of entries that changed.
    pub fn try_settle(&mut self) -> usize {
        let mut applied = 0usize;
        while let Ok(completion) = self.completion_rx.try_recv() {
            if self.apply(completion).is_some() {
                applied = applied.saturating_add(1);
            }
        }
        applied
    }

    /// Derives what the observer should see for the active key.
    #[must_use]
    pub fn observe(&self) -> QueryObservation {
        let Some(key) = self.active.as_ref().filter(|k| k.is_enabled()) else {
            return QueryObservation::idle();
        };

        let entry = self.cache.get(key);
        let is_fetching = entry.is_some_and(|e| e.in_flight.is_some());

        match entry.and_then(|e| e.outcome.clone()) {
            Some(Ok(page)) => QueryObservation {
                state: FetchState::Success(page),
                is_placeholder: false,
                is_fetching,
            },
            Some(Err(err)) => QueryObservation {
                state: FetchState::Error(err),
                is_placeholder: false,
                is_fetching,
            },
            None => match self.placeholder_for(key) {
                Some(page) if is_fetching => QueryObservation {
                    state: FetchState::Success(page),
                    is_placeholder: true,
                    is_fetching,
                },
                _ => QueryObservation {
                    state: FetchState::Pending,
                    is_placeholder: false,
                    is_fetching,
                },
            },
        }
    }

    /// Previous page of the same query, if one was shown.
    fn placeholder_for(&self, key: &QueryKey) -> Option<Arc<ResultPage>> {
        self.placeholder
            .as_ref()
            .filter(|(prev, _)| prev.same_query(key))
            .map(|(_, page)| Arc::clone(page))
    }

    /// Spawns the request task for `key` and marks it in flight.
    fn start_fetch(&mut self, key: QueryKey) {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);

        let now = Instant::now();
        let entry = self
            .cache
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(now));
        entry.in_flight = Some(request_id);
        // A failed key goes back to pending; cached data stays.
        if matches!(entry.outcome, Some(Err(_))) {
            entry.outcome = None;
        }

        tracing::debug!(query = %key.query, page = key.page, request_id, "fetch started");

        let api = Arc::clone(&self.api);
        let params = key.to_params(&self.config);
        let retry = self.config.retry;
        let retry_delay = self.config.retry_delay;
        let tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let outcome = fetch_with_retry(api.as_ref(), &params, retry, retry_delay).await;
            let completion = Completion {
                key,
                request_id,
                outcome,
            };
            if tx.send(completion).is_err() {
                tracing::debug!(request_id, "query client dropped before request settled");
            }
        });
    }

    /// Writes a completion into its own key's entry.
    ///
    /// Returns `None` when the entry is gone or is waiting on a different request.
    fn apply(&mut self, completion: Completion) -> Option<QueryKey> {
        let Completion {
            key,
            request_id,
            outcome,
        } = completion;

        let Some(entry) = self.cache.get_mut(&key) else {
            tracing::debug!(query = %key.query, page = key.page, request_id, "discarding response for evicted key");
            return None;
        };
        if entry.in_flight != Some(request_id) {
            tracing::debug!(query = %key.query, page = key.page, request_id, "discarding superseded response");
            return None;
        }

        entry.in_flight = None;
        match outcome {
            Ok(page) => {
                tracing::debug!(
                    query = %key.query,
                    page = key.page,
                    results = page.results.len(),
                    total_pages = page.total_pages,
                    "fetch succeeded"
                );
                entry.outcome = Some(Ok(Arc::new(page)));
            }
            Err(err) => {
                tracing::warn!(query = %key.query, page = key.page, error = %err, "fetch failed");
                entry.outcome = Some(Err(err));
            }
        }
        Some(key)
    }

    /// Evicts entries unused for longer than `gc_time`.
    ///
    /// The active key and keys with a request in flight are kept.
    fn collect_garbage(&mut self) {
        let gc_time = self.config.gc_time;
        let active = self.active.as_ref();
        let before = self.cache.len();
        self.cache.retain(|key, entry| {
            Some(key) == active
                || entry.in_flight.is_some()
                || entry.last_used.elapsed() <= gc_time
        });
        let evicted = before.saturating_sub(self.cache.len());
        if evicted > 0 {
            tracing::debug!(evicted, "evicted stale cache entries");
        }
    }
}

/// Runs one search, retrying transport failures up to `retry` times.
async fn fetch_with_retry<A: MovieApi + Sync>(
    api: &A,
    params: &SearchMovieParams,
    retry: u32,
    retry_delay: Duration,
) -> Result<ResultPage, FetchError> {
    let mut attempt = 0u32;
    loop {
        match api.search_movie(params).await {
            Err(err) if err.is_network() && attempt < retry => {
                attempt = attempt.saturating_add(1);
                tracing::warn!(
                    retry = attempt,
                    max_retries = retry,
                    error = %err,
                    "search request failed. Retrying..."
                );
                tokio::time::sleep(retry_delay.saturating_mul(attempt)).await;
            }
            other => return other,
        }
    }
}
