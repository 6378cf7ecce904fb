//! A single result card.

use chrono::{Datelike, NaiveDate};
use cinesearch_api::tmdb::Movie;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Card width in cells, borders included.
pub const CARD_WIDTH: u16 = 26;
/// Card height in cells, borders included.
pub const CARD_HEIGHT: u16 = 6;

/// Parses the release year from a `YYYY-MM-DD` date.
#[must_use]
pub fn release_year(movie: &Movie) -> Option<i32> {
    let date = movie.release_date.as_deref()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

/// Formats the rating as `7.8 ★`, or `-` when nobody voted.
#[must_use]
pub fn rating_label(movie: &Movie) -> String {
    if movie.vote_count == 0 {
        return String::from("-");
    }
    format!("{:.1} \u{2605}", movie.vote_average)
}

/// Draws `movie` as a bordered card.
pub fn render(frame: &mut Frame, area: Rect, movie: &Movie, highlighted: bool) {
    let border_style = if highlighted {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let year = release_year(movie).map_or_else(|| String::from("----"), |y| y.to_string());
    let lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(year, Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(rating_label(movie), Style::default().fg(Color::Yellow)),
        ]),
    ];

    let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}
