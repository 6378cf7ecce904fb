//! Spinner shown while the first page of a query loads.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Text next to the spinner.
pub const LOADING_TEXT: &str = "Loading movies, please wait...";

/// Spinner glyph for animation tick `tick`.
#[must_use]
pub fn frame_for(tick: usize) -> char {
    FRAMES.get(tick % FRAMES.len()).copied().unwrap_or(' ')
}

/// Draws the spinner line.
pub fn render(frame: &mut Frame, area: Rect, tick: usize) {
    let line = format!("{} {LOADING_TEXT}", frame_for(tick));
    let loader = Paragraph::new(line)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(loader, area);
}
