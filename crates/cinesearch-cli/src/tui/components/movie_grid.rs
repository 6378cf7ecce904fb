//! Card grid for one page of results.

use cinesearch_api::tmdb::Movie;
use ratatui::Frame;
use ratatui::layout::Rect;

use super::movie_card::{self, CARD_HEIGHT, CARD_WIDTH};

/// Number of card columns that fit in `width`, at least one.
#[must_use]
pub fn columns_for_width(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// First visible row so that the cursor row stays on screen.
#[must_use]
pub fn first_visible_row(cursor: usize, columns: usize, visible_rows: usize) -> usize {
    let cursor_row = cursor / columns.max(1);
    cursor_row.saturating_add(1).saturating_sub(visible_rows.max(1))
}

/// Draws `movies` as a grid and returns the column count used.
#[allow(clippy::arithmetic_side_effects)]
pub fn render(frame: &mut Frame, area: Rect, movies: &[Movie], cursor: usize) -> usize {
    let columns = columns_for_width(area.width);
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let skip_rows = first_visible_row(cursor, columns, visible_rows);

    // Spread leftover width evenly so the grid fills the area.
    let card_width = area.width / u16::try_from(columns).unwrap_or(1).max(1);

    for (i, movie) in movies.iter().enumerate().skip(skip_rows * columns) {
        let row = i / columns - skip_rows;
        if row >= visible_rows {
            break;
        }
        let col = i % columns;
        let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
            break;
        };
        let cell = Rect {
            x: area.x + col * card_width,
            y: area.y + row * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT.min(area.height),
        };
        movie_card::render(frame, cell, movie, i == cursor);
    }

    columns
}
