use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use loghub_types::page_window;

use crate::ui::Theme;

/// One-line pagination bar: prev/next markers and a window of at most five
/// page buttons (1-based labels), the current page highlighted.
pub struct PaginationBar;

impl PaginationBar {
    pub fn render(frame: &mut Frame, area: Rect, page: u64, total_pages: u64, loading: bool) {
        // No controls for zero or one page.
        if total_pages <= 1 {
            return;
        }

        let prev_enabled = !loading && page > 0;
        let next_enabled = !loading && page + 1 < total_pages;

        let mut spans = vec![Span::styled(
            " ◀ Prev ",
            if prev_enabled {
                Theme::text()
            } else {
                Theme::text_dim()
            },
        )];

        for index in page_window(page, total_pages) {
            let label = format!(" {} ", index + 1);
            let style = if index == page {
                Theme::page_current()
            } else if loading {
                Theme::text_dim()
            } else {
                Theme::page_other()
            };
            spans.push(Span::styled(label, style));
        }

        spans.push(Span::styled(
            " Next ▶ ",
            if next_enabled {
                Theme::text()
            } else {
                Theme::text_dim()
            },
        ));

        spans.push(Span::styled(
            format!("  page {} of {}", page + 1, total_pages),
            Theme::text_dim(),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
