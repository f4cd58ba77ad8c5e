use ratatui::{
    Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use loghub_types::LogEvent;

use crate::ui::{Layout, Theme};

/// Modal overlay showing every field of one log event. Absent optional
/// fields are simply not rendered.
pub struct DetailView;

impl DetailView {
    pub fn render(frame: &mut Frame, event: &LogEvent) {
        let area = Layout::centered(frame.area(), 70, 80);
        frame.render_widget(Clear, area);

        let mut lines = Vec::new();

        // Severity badge and millisecond-precision local timestamp.
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", event.level.as_str()),
                Theme::level_badge(event.level),
            ),
            Span::styled("  ", Theme::text()),
            Span::styled(event.format_timestamp_millis(), Theme::text_dim()),
        ]));
        lines.push(Line::from(""));

        lines.push(Line::from(vec![
            Span::styled("Application: ", Theme::text_dim()),
            Span::styled(event.application.as_str(), Theme::text_highlight()),
            Span::styled("   Environment: ", Theme::text_dim()),
            Span::styled(event.environment.as_str(), Theme::text()),
        ]));

        if let Some(trace_id) = &event.trace_id {
            lines.push(Line::from(vec![
                Span::styled("Trace ID: ", Theme::text_dim()),
                Span::styled(trace_id.as_str(), Theme::text()),
            ]));
        }

        if let Some(id) = &event.id {
            lines.push(Line::from(vec![
                Span::styled("ID: ", Theme::text_dim()),
                Span::styled(id.as_str(), Theme::text()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Message", Theme::text_dim())));
        // Full message, newlines preserved; no truncation here.
        for msg_line in event.message.lines() {
            lines.push(Line::from(Span::styled(msg_line, Theme::text())));
        }
        if event.message.is_empty() {
            lines.push(Line::from(""));
        }

        if let Some(sdk) = &event.sdk {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("SDK: ", Theme::text_dim()),
                Span::styled(
                    format!("{} v{}", sdk.language, sdk.version),
                    Theme::text(),
                ),
            ]));
        }

        if let Some(metadata) = &event.metadata {
            if !metadata.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled("Metadata", Theme::text_dim())));
                let pretty = serde_json::to_string_pretty(metadata)
                    .unwrap_or_else(|_| "<unserializable metadata>".to_string());
                for json_line in pretty.lines() {
                    lines.push(Line::from(Span::styled(
                        json_line.to_string(),
                        Theme::text(),
                    )));
                }
            }
        }

        let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_focused())
                .title(Span::styled(" Log Details ", Theme::title()))
                .title_bottom(Span::styled(" [Esc] Close ", Theme::text_dim())),
        );

        frame.render_widget(detail, area);
    }
}
