//! Page strip shown above and below the grid.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Pages shown around the current one.
const WINDOW: u32 = 5;
/// Pages always shown at each end.
const MARGIN: u32 = 1;

/// One entry of the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A 1-based page number.
    Page(u32),
    /// Elided pages.
    Break,
}

/// Computes the visible entries for `total` pages with `current` selected.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn page_items(total: u32, current: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    if total <= WINDOW + 2 * MARGIN {
        return (1..=total).map(PageItem::Page).collect();
    }

    let current = current.clamp(1, total);
    let start = current
        .saturating_sub(WINDOW / 2)
        .clamp(1, total - WINDOW + 1);
    let end = start + WINDOW - 1;

    let mut items = Vec::new();
    for page in 1..=MARGIN.min(start - 1) {
        items.push(PageItem::Page(page));
    }
    if start > MARGIN + 1 {
        items.push(PageItem::Break);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end + MARGIN < total {
        items.push(PageItem::Break);
    }
    for page in (end + 1).max(total - MARGIN + 1)..=total {
        items.push(PageItem::Page(page));
    }
    items
}

/// Draws the page strip centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, total: u32, current: u32) {
    let dim = Style::default().fg(Color::DarkGray);
    let arrow = |enabled: bool| if enabled { Style::default() } else { dim };

    let mut spans = vec![Span::styled("\u{2190} ", arrow(current > 1))];
    for item in page_items(total, current) {
        match item {
            PageItem::Page(page) if page == current => spans.push(Span::styled(
                format!("[{page}]"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            PageItem::Page(page) => spans.push(Span::raw(format!(" {page} "))),
            PageItem::Break => spans.push(Span::styled(" \u{2026} ", dim)),
        }
    }
    spans.push(Span::styled(" \u{2192}", arrow(current < total)));

    let strip = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(strip, area);
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Break, Page};
    use super::*;

    #[test]
    fn test_no_pages() {
        // Arrange & Act & Assert
        assert!(page_items(0, 1).is_empty());
    }

    #[test]
    fn test_few_pages_shows_all() {
        // Arrange & Act
        let items = page_items(5, 3);

        // Assert
        assert_eq!(items, vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
    }

    #[test]
    fn test_seven_pages_shows_all() {
        // Arrange & Act
        let items = page_items(7, 1);

        // Assert
        assert_eq!(items.len(), 7);
        assert!(!items.contains(&Break));
    }

    #[test]
    fn test_window_at_start() {
        // Arrange & Act
        let items = page_items(20, 1);

        // Assert
        assert_eq!(
            items,
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Break, Page(20)]
        );
    }

    #[test]
    fn test_window_in_middle() {
        // Arrange & Act
        let items = page_items(20, 10);

        // Assert
        assert_eq!(
            items,
            vec![
                Page(1),
                Break,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Break,
                Page(20)
            ]
        );
    }

    #[test]
    fn test_window_at_end() {
        // Arrange & Act
        let items = page_items(20, 20);

        // Assert
        assert_eq!(
            items,
            vec![Page(1), Break, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn test_no_break_for_adjacent_margin() {
        // Arrange & Act
        let items = page_items(20, 4);

        // Assert
        assert_eq!(
            items,
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Break, Page(20)]
        );
    }

    #[test]
    fn test_current_out_of_range_is_clamped() {
        // Arrange & Act
        let items = page_items(20, 99);

        // Assert
        assert_eq!(items.last(), Some(&Page(20)));
        assert!(items.contains(&Page(16)));
    }
}
