//! Error banner for a failed search.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Banner text.
pub const ERROR_TEXT: &str = "There was an error, please try again...";

/// Draws the banner with a retry hint.
pub fn render(frame: &mut Frame, area: Rect) {
    let red = Style::default().fg(Color::Red);
    let banner = Paragraph::new(vec![
        Line::styled(ERROR_TEXT, red.add_modifier(Modifier::BOLD)),
        Line::styled("Press r to retry", Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(red));
    frame.render_widget(banner, area);
}
