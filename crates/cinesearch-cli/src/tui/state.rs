//! Search screen state: the coordinator between user input, the fetch
//! orchestrator and the notification toasts.

use std::time::{Duration, Instant};

use cinesearch_api::tmdb::{Movie, ResultPage};
use cinesearch_query::{QueryKey, QueryObservation};

use super::components::search_bar::{ValidationError, validate_query};

/// Input mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Grid navigation mode.
    Normal,
    /// Search bar has focus.
    Editing,
}

/// One-shot notifications raised by fetch state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A search succeeded with zero results.
    NoResults,
    /// A search failed.
    FetchFailed,
}

impl Notification {
    /// Text shown in the toast.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoResults => "No movies found for your request",
            Self::FetchFailed => "Failed to fetch movies",
        }
    }
}

/// A transient message in the corner of the screen.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Message text.
    pub message: String,
    /// When the toast disappears.
    pub expires_at: Instant,
}

impl Toast {
    /// Creates a toast that lives for `duration`.
    #[must_use]
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now()
                .checked_add(duration)
                .unwrap_or_else(Instant::now),
        }
    }

    /// Returns `true` once the toast should be removed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// State for the movie search TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchState {
    /// Submitted query. Empty means no search is active.
    pub query: String,
    /// 1-based result page.
    pub page: u32,
    /// Movie shown in the detail modal.
    pub selected_movie: Option<Movie>,
    /// Text currently typed into the search bar.
    pub input: String,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Grid cursor (index into the current page's results).
    pub cursor: usize,
    /// Grid column count from the last draw.
    pub grid_columns: usize,
    /// Visible toasts, oldest first.
    pub toasts: Vec<Toast>,
    /// Animation tick counter.
    pub tick: usize,
    /// Last observation of the active key.
    observation: QueryObservation,
    /// "No results" toast already shown for the current episode.
    no_results_notified: bool,
    /// "Failed to fetch" toast already shown for the current episode.
    error_notified: bool,
    /// Page count from the last data seen for the current query.
    known_total_pages: u32,
    /// Toast lifetime.
    toast_duration: Duration,
}

impl SearchState {
    /// Creates an idle state with an empty query.
    #[must_use]
    pub const fn new(toast_duration: Duration) -> Self {
        Self {
            query: String::new(),
            page: 1,
            selected_movie: None,
            input: String::new(),
            input_mode: InputMode::Editing,
            cursor: 0,
            grid_columns: 1,
            toasts: Vec::new(),
            tick: 0,
            observation: QueryObservation::idle(),
            no_results_notified: false,
            error_notified: false,
            known_total_pages: 0,
            toast_duration,
        }
    }

    /// Cache key for the current query and page.
    #[must_use]
    pub fn key(&self) -> QueryKey {
        QueryKey::new(self.query.clone(), self.page)
    }

    /// Last observation of the active key.
    #[must_use]
    pub const fn observation(&self) -> &QueryObservation {
        &self.observation
    }

    /// Page to render, if any.
    #[must_use]
    pub fn data(&self) -> Option<&ResultPage> {
        self.observation.data()
    }

    /// Total pages of the current (or placeholder) data.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.data().map_or(0, |d| d.total_pages)
    }

    // --- Transitions ---

    /// Submits a search.
    ///
    /// Sets `query` to the trimmed text and resets `page` to 1. A different
    /// query re-arms both notification latches.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyQuery`] for blank input; state is unchanged.
    pub fn submit_search(&mut self, raw: &str) -> Result<(), ValidationError> {
        let text = validate_query(raw)?;
        if text != self.query {
            self.no_results_notified = false;
            self.error_notified = false;
            self.known_total_pages = 0;
            self.query = text;
        }
        self.page = 1;
        self.cursor = 0;
        Ok(())
    }

    /// Submits the search bar contents and leaves editing mode on success.
    ///
    /// # Errors
    ///
    /// Same as [`SearchState::submit_search`].
    pub fn submit_input(&mut self) -> Result<(), ValidationError> {
        let input = self.input.clone();
        self.submit_search(&input)?;
        self.input = self.query.clone();
        self.input_mode = InputMode::Normal;
        Ok(())
    }

    /// Selects a page by zero-based index, as a pagination control reports it.
    pub const fn change_page(&mut self, selected: u32) {
        self.page = selected.saturating_add(1);
        self.cursor = 0;
    }

    /// Page count for navigation: the current data, or the last data seen
    /// for this query while the current page has none (pending or failed).
    fn navigable_pages(&self) -> u32 {
        if self.data().is_some() {
            self.total_pages()
        } else {
            self.known_total_pages
        }
    }

    /// Moves to the next page, if there is one.
    pub fn next_page(&mut self) {
        if self.page < self.navigable_pages() {
            self.change_page(self.page);
        }
    }

    /// Moves to the previous page, if there is one.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.change_page(self.page.saturating_sub(2));
        }
    }

    /// Jumps to the first page.
    pub fn first_page(&mut self) {
        if self.page > 1 {
            self.change_page(0);
        }
    }

    /// Jumps to the last page.
    pub fn last_page(&mut self) {
        let total = self.navigable_pages();
        if total > self.page {
            self.change_page(total.saturating_sub(1));
        }
    }

    /// Opens the detail modal for `movie`.
    pub fn select_movie(&mut self, movie: Movie) {
        self.selected_movie = Some(movie);
    }

    /// Opens the detail modal for the movie under the cursor.
    pub fn select_current(&mut self) {
        if let Some(movie) = self.data().and_then(|d| d.results.get(self.cursor)).cloned() {
            self.select_movie(movie);
        }
    }

    /// Closes the detail modal.
    pub fn close_modal(&mut self) {
        self.selected_movie = None;
    }

    // --- Fetch state ---

    /// Records a new observation and returns the notifications it triggers.
    ///
    /// Each notification fires at most once per episode: the latch is set
    /// when it fires and cleared only when the condition goes away (a
    /// non-empty result, a non-error state) or the query changes.
    pub fn observe(&mut self, observation: QueryObservation) -> Vec<Notification> {
        let mut fired = Vec::new();
        let has_query = !self.query.is_empty();

        if let Some(data) = observation.data() {
            self.known_total_pages = data.total_pages;
            if data.results.is_empty() {
                if has_query && !self.no_results_notified {
                    tracing::info!(query = %self.query, "{}", Notification::NoResults.message());
                    fired.push(Notification::NoResults);
                    self.no_results_notified = true;
                }
            } else {
                self.no_results_notified = false;
            }
        }

        if observation.is_error() {
            if has_query && !self.error_notified {
                if let Some(err) = observation.error() {
                    tracing::warn!(query = %self.query, error = %err, "{}", Notification::FetchFailed.message());
                }
                fired.push(Notification::FetchFailed);
                self.error_notified = true;
            }
        } else {
            self.error_notified = false;
        }

        self.observation = observation;
        self.clamp_cursor();
        fired
    }

    /// Shows a toast for `notification`.
    pub fn push_toast(&mut self, notification: Notification) {
        self.toasts
            .push(Toast::new(notification.message(), self.toast_duration));
    }

    /// Advances animations and drops expired toasts.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.toasts.retain(|t| !t.is_expired());
    }

    // --- Rendering policy ---

    /// Loader is shown while the first response for the key is pending.
    #[must_use]
    pub fn show_loader(&self) -> bool {
        self.observation.is_pending() && !self.query.is_empty()
    }

    /// Error banner is shown when the key's last attempt failed.
    #[must_use]
    pub fn show_error(&self) -> bool {
        self.observation.is_error() && !self.query.is_empty()
    }

    /// Grid is shown when there is at least one movie to show.
    #[must_use]
    pub fn show_grid(&self) -> bool {
        self.data().is_some_and(|d| !d.results.is_empty())
    }

    /// Pagination (above and below the grid) is shown whenever the data
    /// spans more than one page, even if this page came back empty.
    #[must_use]
    pub fn show_pagination(&self) -> bool {
        self.data().is_some_and(|d| d.total_pages > 1)
    }

    /// Modal is shown while a movie is selected.
    #[must_use]
    pub const fn show_modal(&self) -> bool {
        self.selected_movie.is_some()
    }

    // --- Grid cursor ---

    fn result_count(&self) -> usize {
        self.data().map_or(0, |d| d.results.len())
    }

    fn clamp_cursor(&mut self) {
        let count = self.result_count();
        if count == 0 {
            self.cursor = 0;
        } else if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
    }

    /// Moves the cursor one card left.
    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor one card right.
    pub fn move_right(&mut self) {
        if self.cursor.saturating_add(1) < self.result_count() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Moves the cursor one row up.
    pub const fn move_up(&mut self) {
        if self.cursor >= self.grid_columns {
            self.cursor = self.cursor.saturating_sub(self.grid_columns);
        }
    }

    /// Moves the cursor one row down, stopping on the last card.
    pub fn move_down(&mut self) {
        let count = self.result_count();
        let columns = self.grid_columns.max(1);
        let target = self.cursor.saturating_add(columns);
        let last = count.saturating_sub(1);
        if target < count {
            self.cursor = target;
        } else if count > 0 && self.cursor / columns < last / columns {
            // Partial last row: land on its final card.
            self.cursor = last;
        }
    }

    // --- Search bar editing ---

    /// Gives focus to the search bar.
    pub const fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    /// Returns focus to the grid without submitting.
    pub const fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Appends a character to the search bar.
    pub fn input_push(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Removes the last character from the search bar.
    pub fn input_pop(&mut self) {
        self.input.pop();
    }

    /// Clears the search bar.
    pub fn input_clear(&mut self) {
        self.input.clear();
    }
}
