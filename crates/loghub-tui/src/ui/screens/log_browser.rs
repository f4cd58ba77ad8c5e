use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use loghub_types::truncate_message;

use crate::app::{AppState, FetchState, Focus};
use crate::ui::{
    Layout, Theme,
    components::{FilterForm, PaginationBar, StatusBar, browser_hints, form_hints},
};

/// Maximum characters of a message shown in a table row. The detail view
/// always shows the full message.
const MESSAGE_PREVIEW_CHARS: usize = 80;

/// The log browser screen: header, filter form, table, pagination, status.
pub struct LogBrowserScreen;

impl LogBrowserScreen {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let show_error = state.error_message().is_some();
        let areas = Layout::browser(frame.area(), show_error);

        Self::render_header(frame, areas.header, state);
        FilterForm::render(frame, areas.filters, state);

        if let (Some(area), Some(message)) = (areas.error, state.error_message()) {
            Self::render_error_banner(frame, area, message);
        }

        Self::render_table(frame, areas.table, state);
        PaginationBar::render(
            frame,
            areas.pagination,
            state.page,
            state.total_pages,
            state.is_loading(),
        );
        Self::render_status_bar(frame, areas.status, state);
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![
            Span::styled("loghub", Theme::title()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(state.api_target.as_str(), Theme::text_dim()),
        ];

        if state.fetch == FetchState::Loaded {
            let noun = if state.total_elements == 1 { "log" } else { "logs" };
            spans.push(Span::styled(" │ ", Theme::text_dim()));
            spans.push(Span::styled(
                format!("{} {}", state.total_elements, noun),
                Theme::text(),
            ));
            if state.total_pages > 1 {
                spans.push(Span::styled(
                    format!(" (page {} of {})", state.page + 1, state.total_pages),
                    Theme::text_dim(),
                ));
            }
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
        frame.render_widget(header, area);
    }

    fn render_error_banner(frame: &mut Frame, area: Rect, message: &str) {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled("⚠ ", Theme::error()),
            Span::styled(message, Theme::error()),
            Span::styled("  [Esc] Dismiss  [r] Retry", Theme::text_dim()),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::error()),
        );
        frame.render_widget(banner, area);
    }

    fn render_table(frame: &mut Frame, area: Rect, state: &mut AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if state.focus == Focus::Table {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(" Logs ", Theme::title()));

        if state.is_loading() {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("Loading logs...", Theme::text_dim())),
            ])
            .centered()
            .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        if state.logs.is_empty() {
            let message = if state.error_message().is_some() {
                vec![Line::from("")]
            } else {
                vec![
                    Line::from(""),
                    Line::from(Span::styled("No logs found.", Theme::text())),
                    Line::from(Span::styled(
                        "Try adjusting the filters or wait for new logs.",
                        Theme::text_dim(),
                    )),
                ]
            };
            let placeholder = Paragraph::new(message).centered().block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Timestamp"),
            Cell::from("Level"),
            Cell::from("Application"),
            Cell::from("Environment"),
            Cell::from("Message"),
        ])
        .style(Theme::table_header());

        let rows: Vec<Row> = state
            .logs
            .iter()
            .map(|event| {
                Row::new(vec![
                    Cell::from(event.format_timestamp()),
                    Cell::from(Span::styled(
                        event.level.as_str(),
                        Theme::level_badge(event.level),
                    )),
                    Cell::from(Span::styled(
                        event.application.as_str(),
                        Theme::text_highlight(),
                    )),
                    Cell::from(event.environment.as_str()),
                    Cell::from(
                        truncate_message(&event.message, MESSAGE_PREVIEW_CHARS).into_owned(),
                    ),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(19),
            Constraint::Length(5),
            Constraint::Percentage(16),
            Constraint::Percentage(12),
            Constraint::Min(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Theme::row_selected())
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut state.table_state);
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = match state.focus {
            Focus::Filters => form_hints(),
            Focus::Table => browser_hints(),
        };

        let right = if state.filters.is_empty() {
            format!("page size {}", state.size)
        } else {
            "filtered".to_string()
        };

        let status = StatusBar::new().hints(hints).right(right);
        frame.render_widget(status, area);
    }
}
