//! Detail popup for the selected movie.

use cinesearch_api::tmdb::{Movie, movie_page_url, poster_url};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::movie_card::rating_label;

/// Rect of `percent_x` by `percent_y` centered in `area`.
#[must_use]
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Body lines of the popup.
#[must_use]
pub fn detail_lines(movie: &Movie) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{name:<10}"), label), Span::raw(value)])
    };

    let mut lines = Vec::new();
    if !movie.original_title.is_empty() && movie.original_title != movie.title {
        lines.push(field("Original", movie.original_title.clone()));
    }
    lines.push(field(
        "Released",
        movie
            .release_date
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| String::from("unknown")),
    ));
    lines.push(field(
        "Rating",
        format!("{} ({} votes)", rating_label(movie), movie.vote_count),
    ));
    if let Some(path) = movie.poster_path.as_deref() {
        lines.push(field("Poster", poster_url(path)));
    }
    lines.push(field("TMDB", movie_page_url(movie.id)));
    lines.push(Line::default());
    lines.push(Line::from(
        movie
            .overview
            .clone()
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| String::from("No overview available.")),
    ));
    lines
}

/// Draws the popup over everything else.
pub fn render(frame: &mut Frame, area: Rect, movie: &Movie) {
    let popup = centered_rect(area, 70, 70);
    frame.render_widget(Clear, popup);

    let inner = popup.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    let [body, hints] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", movie.title),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(block, popup);

    let detail = Paragraph::new(detail_lines(movie)).wrap(Wrap { trim: false });
    frame.render_widget(detail, body);

    let hint = Paragraph::new("Esc/q: close | o: open in browser")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, hints);
}
