//! Toast overlay in the top-right corner.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::state::Toast;

const TOAST_HEIGHT: u16 = 3;
const MAX_TOAST_WIDTH: u16 = 48;

/// Draws `toasts` stacked downward from the top-right corner of `area`.
#[allow(clippy::arithmetic_side_effects)]
pub fn render(frame: &mut Frame, area: Rect, toasts: &[Toast]) {
    let mut y = area.y;
    for toast in toasts {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let text_width = u16::try_from(toast.message.chars().count()).unwrap_or(u16::MAX);
        let width = text_width
            .saturating_add(4)
            .min(MAX_TOAST_WIDTH)
            .min(area.width);
        let rect = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height: TOAST_HEIGHT,
        };

        frame.render_widget(Clear, rect);
        let widget = Paragraph::new(toast.message.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(widget, rect);
        y += TOAST_HEIGHT;
    }
}
