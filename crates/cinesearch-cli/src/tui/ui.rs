//! TUI rendering logic for the search screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::components::{
    error_message, loader, movie_grid, movie_modal, pagination, search_bar, toast,
};
use super::state::{InputMode, SearchState};

/// Draws the search screen. Returns the grid column count for cursor movement.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &SearchState) -> usize {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search bar
            Constraint::Length(1), // status line
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    search_bar::render(frame, chunks[0], state);
    draw_status(frame, chunks[1], state);
    let columns = draw_main(frame, chunks[2], state);
    draw_footer(frame, chunks[3], state);

    // Overlays last so they sit on top.
    if let Some(movie) = &state.selected_movie {
        movie_modal::render(frame, frame.area(), movie);
    }
    toast::render(frame, frame.area(), &state.toasts);

    columns
}

/// Draws the one-line summary under the search bar.
fn draw_status(frame: &mut Frame, area: Rect, state: &SearchState) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();

    if let Some(data) = state.data() {
        spans.push(Span::raw(format!(
            " \"{}\": {} results",
            state.query, data.total_results
        )));
        if data.total_pages > 0 {
            spans.push(Span::styled(
                format!("  page {} of {}", state.page, data.total_pages),
                dim,
            ));
        }
    } else if !state.query.is_empty() {
        spans.push(Span::raw(format!(" \"{}\"", state.query)));
    }

    let obs = state.observation();
    if obs.is_placeholder {
        spans.push(Span::styled("  (previous page)", dim));
    }
    if obs.is_fetching && !state.show_loader() {
        spans.push(Span::styled(
            format!("  {} updating", loader::frame_for(state.tick)),
            Style::default().fg(Color::Cyan),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draws the loader, error banner or grid. Returns the grid column count.
#[allow(clippy::indexing_slicing)]
fn draw_main(frame: &mut Frame, area: Rect, state: &SearchState) -> usize {
    if state.show_loader() {
        let [_, line, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        loader::render(frame, line, state.tick);
        return state.grid_columns;
    }

    if state.show_error() {
        let [banner, _] =
            Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).areas(area);
        error_message::render(frame, banner);
        return state.grid_columns;
    }

    let Some(data) = state.data() else {
        if state.query.is_empty() {
            let hint = Paragraph::new("Type a movie title and press Enter to search")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::NONE));
            frame.render_widget(hint, area);
        }
        return state.grid_columns;
    };

    if state.show_pagination() {
        let parts = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
        pagination::render(frame, parts[0], data.total_pages, state.page);
        pagination::render(frame, parts[2], data.total_pages, state.page);
        if state.show_grid() {
            movie_grid::render(frame, parts[1], &data.results, state.cursor)
        } else {
            state.grid_columns
        }
    } else if state.show_grid() {
        movie_grid::render(frame, area, &data.results, state.cursor)
    } else {
        state.grid_columns
    }
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &SearchState) {
    let help_text = if state.show_modal() {
        "Esc/q/Enter: close | o: open in browser | Ctrl-C: quit"
    } else if state.input_mode == InputMode::Editing {
        "Type to search | Enter: submit | Esc: back to results | Ctrl-C: quit"
    } else {
        "\u{2190}\u{2193}\u{2191}\u{2192}/hjkl: move | Enter: details | [ ]: page | Home/End: first/last | /: search | r: refetch | q: quit"
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;
    use std::time::Duration;

    use cinesearch_api::tmdb::{FetchError, Movie, ResultPage};
    use cinesearch_query::{FetchState, QueryObservation};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::tui::state::Notification;

    fn render(state: &SearchState) -> (String, usize) {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut columns = 0;
        terminal
            .draw(|frame| {
                columns = draw(frame, state);
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect::<String>();
        (text, columns)
    }

    fn batman_page(total_pages: u32) -> ResultPage {
        ResultPage {
            page: 1,
            results: vec![
                Movie {
                    id: 414_906,
                    title: String::from("The Batman"),
                    release_date: Some(String::from("2022-03-01")),
                    vote_average: 7.7,
                    vote_count: 9000,
                    ..Movie::default()
                },
                Movie {
                    id: 268,
                    title: String::from("Batman"),
                    release_date: Some(String::from("1989-06-21")),
                    vote_average: 7.2,
                    vote_count: 7000,
                    ..Movie::default()
                },
            ],
            total_pages,
            total_results: 92,
        }
    }

    fn observed(state: FetchState) -> QueryObservation {
        QueryObservation {
            state,
            is_placeholder: false,
            is_fetching: false,
        }
    }

    #[test]
    fn test_idle_shows_hint() {
        // Arrange
        let state = SearchState::new(Duration::from_secs(4));

        // Act
        let (text, _) = render(&state);

        // Assert
        assert!(text.contains("Type a movie title and press Enter to search"));
        assert!(!text.contains("Loading movies"));
    }

    #[test]
    fn test_pending_shows_loader() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(4));
        state.submit_search("batman").unwrap();
        state.observe(QueryObservation {
            state: FetchState::Pending,
            is_placeholder: false,
            is_fetching: true,
        });

        // Act
        let (text, _) = render(&state);

        // Assert
        assert!(text.contains("Loading movies, please wait..."));
    }

    #[test]
    fn test_error_shows_banner_and_toast() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(60));
        state.submit_search("batman").unwrap();
        let fired = state.observe(observed(FetchState::Error(FetchError::Network(
            String::from("timed out"),
        ))));
        for n in fired {
            state.push_toast(n);
        }

        // Act
        let (text, _) = render(&state);

        // Assert
        assert!(text.contains("There was an error, please try again..."));
        assert!(text.contains(Notification::FetchFailed.message()));
    }

    #[test]
    fn test_success_shows_grid_and_pagination() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(4));
        state.submit_search("batman").unwrap();
        state.observe(observed(FetchState::Success(Arc::new(batman_page(5)))));

        // Act
        let (text, columns) = render(&state);

        // Assert
        assert!(text.contains("The Batman"));
        assert!(text.contains("2022"));
        assert!(text.contains("[1]"));
        assert_eq!(text.matches("[1]").count(), 2);
        assert!(text.contains("92 results"));
        assert_eq!(columns, movie_grid::columns_for_width(120));
    }

    #[test]
    fn test_changed_page_is_highlighted_in_both_strips() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(4));
        state.submit_search("batman").unwrap();
        state.change_page(2);
        state.observe(observed(FetchState::Success(Arc::new(batman_page(5)))));

        // Act
        let (text, _) = render(&state);

        // Assert
        assert_eq!(text.matches("[3]").count(), 2);
        assert!(!text.contains("[1]"));
        assert!(text.contains("page 3 of 5"));
    }

    #[test]
    fn test_empty_page_still_shows_both_strips() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(4));
        state.submit_search("batman").unwrap();
        state.change_page(2);
        state.observe(observed(FetchState::Success(Arc::new(ResultPage {
            page: 3,
            results: Vec::new(),
            total_pages: 3,
            total_results: 40,
        }))));

        // Act
        let (text, _) = render(&state);

        // Assert
        assert_eq!(text.matches("[3]").count(), 2);
        assert!(!text.contains("The Batman"));
    }

    #[test]
    fn test_single_page_hides_pagination() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(4));
        state.submit_search("batman").unwrap();
        state.observe(observed(FetchState::Success(Arc::new(batman_page(1)))));

        // Act
        let (text, _) = render(&state);

        // Assert
        assert!(text.contains("The Batman"));
        assert!(!text.contains("[1]"));
    }

    #[test]
    fn test_selected_movie_shows_modal() {
        // Arrange
        let mut state = SearchState::new(Duration::from_secs(4));
        state.submit_search("batman").unwrap();
        state.observe(observed(FetchState::Success(Arc::new(batman_page(5)))));
        state.cursor = 1;
        state.select_current();

        // Act
        let (text, _) = render(&state);

        // Assert
        assert!(text.contains("https://www.themoviedb.org/movie/268"));
        assert!(text.contains("o: open in browser"));
    }
}
