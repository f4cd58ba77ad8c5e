use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Regions of the log browser screen.
pub struct BrowserAreas {
    pub header: Rect,
    pub filters: Rect,
    pub error: Option<Rect>,
    pub table: Rect,
    pub pagination: Rect,
    pub status: Rect,
}

/// Layout helper for consistent screen layouts
pub struct Layout;

impl Layout {
    /// Vertical split of the browser screen. The error banner row only
    /// exists while a fetch failure is being shown.
    pub fn browser(area: Rect, show_error: bool) -> BrowserAreas {
        let mut constraints = vec![
            Constraint::Length(3), // Header
            Constraint::Length(4), // Filter form
        ];
        if show_error {
            constraints.push(Constraint::Length(3)); // Error banner
        }
        constraints.push(Constraint::Min(1)); // Table
        constraints.push(Constraint::Length(1)); // Pagination
        constraints.push(Constraint::Length(1)); // Status bar

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;
        let header = chunks[idx];
        idx += 1;
        let filters = chunks[idx];
        idx += 1;
        let error = if show_error {
            let rect = chunks[idx];
            idx += 1;
            Some(rect)
        } else {
            None
        };
        let table = chunks[idx];
        let pagination = chunks[idx + 1];
        let status = chunks[idx + 2];

        BrowserAreas {
            header,
            filters,
            error,
            table,
            pagination,
            status,
        }
    }

    /// Centered popup area for overlays (detail view, help).
    pub fn centered(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
        let horizontal = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - width_percent) / 2),
                Constraint::Percentage(width_percent),
                Constraint::Percentage((100 - width_percent) / 2),
            ])
            .split(area);

        let vertical = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - height_percent) / 2),
                Constraint::Percentage(height_percent),
                Constraint::Percentage((100 - height_percent) / 2),
            ])
            .split(horizontal[1]);

        vertical[1]
    }
}
