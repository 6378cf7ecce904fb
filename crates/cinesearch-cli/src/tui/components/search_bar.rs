//! Search input line.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::state::{InputMode, SearchState};

/// Rejected search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The query is empty after trimming.
    #[error("search query must not be empty")]
    EmptyQuery,
}

/// Trims `raw` and rejects blank input.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyQuery`] if nothing is left after trimming.
pub fn validate_query(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    Ok(String::from(trimmed))
}

/// Draws the search bar and places the terminal cursor while editing.
pub fn render(frame: &mut Frame, area: Rect, state: &SearchState) {
    let editing = state.input_mode == InputMode::Editing;
    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let input = Paragraph::new(state.input.as_str()).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search movies: / "),
    );
    frame.render_widget(input, area);

    if editing {
        let width = u16::try_from(state.input.chars().count()).unwrap_or(u16::MAX);
        let max_x = area.x.saturating_add(area.width.saturating_sub(2));
        let x = area.x.saturating_add(1).saturating_add(width).min(max_x);
        frame.set_cursor_position(Position::new(x, area.y.saturating_add(1)));
    }
}
