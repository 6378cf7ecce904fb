//! Movie search TUI main loop.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use cinesearch_api::tmdb::{MovieApi, movie_page_url};
use cinesearch_query::QueryClient;
use crossterm::event::{
    DisableFocusChange, EnableFocusChange, Event, EventStream, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::time::MissedTickBehavior;

use super::state::{InputMode, SearchState};
use super::ui;

/// Redraw interval for the spinner and toast expiry.
const TICK_RATE: Duration = Duration::from_millis(100);

/// What the loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond redrawing.
    None,
    /// Leave the TUI.
    Quit,
    /// Force a new request for the current key.
    Refetch,
    /// Open a URL in the system browser.
    Open(String),
}

/// Options for [`run_search_tui`].
#[derive(Debug, Clone, Default)]
pub struct TuiOptions {
    /// Query submitted on startup.
    pub initial_query: Option<String>,
    /// Toast lifetime.
    pub toast_duration: Duration,
}

/// Runs the movie search TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_search_tui<A>(client: QueryClient<A>, options: TuiOptions) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    let mut state = SearchState::new(options.toast_duration);
    if let Some(query) = options.initial_query.as_deref() {
        state.input = String::from(query.trim());
        if state.submit_input().is_err() {
            state.input_clear();
        }
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableFocusChange)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, client, &mut state).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// One wake-up of the event loop.
enum Step {
    Input(Option<io::Result<Event>>),
    Settled,
    Tick,
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut client: QueryClient<A>,
    state: &mut SearchState,
) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    sync(&mut client, state);

    loop {
        terminal
            .draw(|frame| {
                state.grid_columns = ui::draw(frame, state).max(1);
            })
            .context("failed to draw TUI")?;

        let step = tokio::select! {
            event = events.next() => Step::Input(event),
            _ = client.settled() => Step::Settled,
            _ = ticker.tick() => Step::Tick,
        };

        match step {
            Step::Input(None) => return Ok(()),
            Step::Input(Some(event)) => {
                match event.context("failed to read event")? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match handle_key(state, key) {
                            Action::None => {}
                            Action::Quit => return Ok(()),
                            Action::Refetch => client.refetch(&state.key()),
                            Action::Open(url) => open_in_browser(&url),
                        }
                    }
                    Event::FocusGained => client.on_focus_gained(),
                    _ => {}
                }
            }
            Step::Settled => {
                client.try_settle();
            }
            Step::Tick => state.on_tick(),
        }

        sync(&mut client, state);
    }
}

/// Points the orchestrator at the current key and turns the new
/// observation into toasts.
fn sync<A>(client: &mut QueryClient<A>, state: &mut SearchState)
where
    A: MovieApi + Send + Sync + 'static,
{
    client.activate(state.key());
    for notification in state.observe(client.observe()) {
        state.push_toast(notification);
    }
}

/// Opens `url` in the system browser, logging failures.
fn open_in_browser(url: &str) {
    if let Err(err) = open::that_detached(url) {
        tracing::warn!(url, error = %err, "failed to open browser");
    }
}

/// Dispatches a key press by mode. Ctrl-C always quits.
pub fn handle_key(state: &mut SearchState, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if state.show_modal() {
        return handle_modal_input(state, key.code);
    }

    match state.input_mode {
        InputMode::Editing => {
            handle_editing_input(state, key.code);
            Action::None
        }
        InputMode::Normal => handle_normal_input(state, key.code),
    }
}

/// Handles key input while the detail modal is open.
fn handle_modal_input(state: &mut SearchState, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => state.close_modal(),
        KeyCode::Char('o') => {
            if let Some(movie) = &state.selected_movie {
                return Action::Open(movie_page_url(movie.id));
            }
        }
        _ => {}
    }
    Action::None
}

/// Handles key input while the search bar has focus.
fn handle_editing_input(state: &mut SearchState, key: KeyCode) {
    match key {
        KeyCode::Enter => {
            if let Err(err) = state.submit_input() {
                tracing::debug!(error = %err, "ignoring search submission");
            }
        }
        KeyCode::Esc => state.stop_editing(),
        KeyCode::Backspace => state.input_pop(),
        KeyCode::Char(c) => state.input_push(c),
        _ => {}
    }
}

/// Handles key input in grid navigation mode.
fn handle_normal_input(state: &mut SearchState, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('r') => return Action::Refetch,
        KeyCode::Char('/' | 's') => state.start_editing(),
        KeyCode::Left | KeyCode::Char('h') => state.move_left(),
        KeyCode::Right | KeyCode::Char('l') => state.move_right(),
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Enter => state.select_current(),
        KeyCode::Char(']') | KeyCode::PageDown => state.next_page(),
        KeyCode::Char('[') | KeyCode::PageUp => state.prev_page(),
        KeyCode::Home => state.first_page(),
        KeyCode::End => state.last_page(),
        KeyCode::Esc => state.start_editing(),
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cinesearch_api::tmdb::{FetchError, Movie, ResultPage, SearchMovieParams};
    use cinesearch_query::{FetchState, QueryConfig, QueryObservation};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut SearchState, text: &str) {
        for ch in text.chars() {
            handle_key(state, press(KeyCode::Char(ch)));
        }
    }

    /// Always times out and counts calls.
    #[derive(Clone, Default)]
    struct TimeoutApi {
        calls: Arc<AtomicUsize>,
    }

    impl MovieApi for TimeoutApi {
        async fn search_movie(&self, _params: &SearchMovieParams) -> Result<ResultPage, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::Network(String::from("timed out")))
        }
    }

    fn loaded_state() -> SearchState {
        let mut state = SearchState::new(Duration::from_secs(4));
        type_text(&mut state, "batman");
        handle_key(&mut state, press(KeyCode::Enter));
        let results = (0..12)
            .map(|i| Movie {
                id: 100 + i,
                title: format!("Batman {i}"),
                ..Movie::default()
            })
            .collect();
        state.observe(QueryObservation {
            state: FetchState::Success(Arc::new(ResultPage {
                page: 1,
                results,
                total_pages: 5,
                total_results: 92,
            })),
            is_placeholder: false,
            is_fetching: false,
        });
        state.grid_columns = 4;
        state
    }

    #[test]
    fn test_typing_and_enter_submits() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(4));

        // Act
        type_text(&mut state, "  batman");
        let action = handle_key(&mut state, press(KeyCode::Enter));

        // Assert
        assert_eq!(action, Action::None);
        assert_eq!(state.query, "batman");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_blank_enter_is_ignored() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(4));
        type_text(&mut state, "   ");

        // Act
        handle_key(&mut state, press(KeyCode::Enter));

        // Assert
        assert!(state.query.is_empty());
        assert_eq!(state.input_mode, InputMode::Editing);
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn test_q_types_while_editing() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(4));

        // Act
        let action = handle_key(&mut state, press(KeyCode::Char('q')));

        // Assert
        assert_eq!(action, Action::None);
        assert_eq!(state.input, "q");
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(4));
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        // Act & Assert
        assert_eq!(handle_key(&mut state, key), Action::Quit);
    }

    #[test]
    fn test_normal_mode_quit_and_refetch() {
        // Arrange
        let mut state = loaded_state();

        // Act & Assert
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('r'))), Action::Refetch);
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn test_enter_opens_modal_and_esc_closes() {
        // Arrange
        let mut state = loaded_state();
        handle_key(&mut state, press(KeyCode::Down));
        handle_key(&mut state, press(KeyCode::Right));

        // Act
        handle_key(&mut state, press(KeyCode::Enter));
        let title = state.selected_movie.as_ref().map(|m| m.title.clone());
        handle_key(&mut state, press(KeyCode::Esc));

        // Assert
        assert_eq!(title.as_deref(), Some("Batman 5"));
        assert!(!state.show_modal());
        assert_eq!(state.query, "batman");
    }

    #[test]
    fn test_modal_o_opens_movie_page() {
        // Arrange
        let mut state = loaded_state();
        handle_key(&mut state, press(KeyCode::Enter));

        // Act
        let action = handle_key(&mut state, press(KeyCode::Char('o')));

        // Assert
        assert_eq!(
            action,
            Action::Open(String::from("https://www.themoviedb.org/movie/100"))
        );
        assert!(state.show_modal());
    }

    #[test]
    fn test_page_keys() {
        // Arrange
        let mut state = loaded_state();

        // Act & Assert
        handle_key(&mut state, press(KeyCode::Char(']')));
        assert_eq!(state.page, 2);
        handle_key(&mut state, press(KeyCode::End));
        assert_eq!(state.page, 5);
        handle_key(&mut state, press(KeyCode::PageUp));
        assert_eq!(state.page, 4);
        handle_key(&mut state, press(KeyCode::Home));
        assert_eq!(state.page, 1);
    }

    #[tokio::test]
    async fn test_repeated_sync_after_failure_neither_refetches_nor_retoasts() {
        // Arrange
        let api = TimeoutApi::default();
        let calls = Arc::clone(&api.calls);
        let mut client = QueryClient::new(
            api,
            QueryConfig {
                retry: 1,
                retry_delay: Duration::from_millis(1),
                ..QueryConfig::default()
            },
        );
        let mut state = SearchState::new(Duration::from_secs(60));
        state.submit_search("batman").unwrap();
        sync(&mut client, &mut state);

        // Act
        tokio::time::timeout(Duration::from_secs(5), client.settled())
            .await
            .unwrap();
        for _ in 0..20 {
            sync(&mut client, &mut state);
        }

        // Assert
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.toasts.len(), 1);
        assert!(state.show_error());
    }

    #[test]
    fn test_slash_focuses_search() {
        // Arrange
        let mut state = loaded_state();

        // Act
        handle_key(&mut state, press(KeyCode::Char('/')));
        handle_key(&mut state, press(KeyCode::Backspace));

        // Assert
        assert_eq!(state.input_mode, InputMode::Editing);
        assert_eq!(state.input, "batma");
    }
}
