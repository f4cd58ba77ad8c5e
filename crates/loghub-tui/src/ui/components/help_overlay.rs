use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::Layout;

/// Help overlay showing keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut ratatui::Frame) {
        let area = Layout::centered(frame.area(), 50, 70);
        frame.render_widget(Clear, area);

        let help_text = vec![
            Line::from(Span::styled(
                "Keybindings",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("Table", Style::default().fg(Color::Yellow))),
            Self::key_line("j/↓", "Next row"),
            Self::key_line("k/↑", "Previous row"),
            Self::key_line("g/G", "First / last row"),
            Self::key_line("Enter", "Open log details"),
            Self::key_line("h/←", "Previous page"),
            Self::key_line("l/→", "Next page"),
            Self::key_line("1-9", "Jump to page"),
            Self::key_line("r", "Refresh current page"),
            Self::key_line("c", "Clear filters and search"),
            Line::from(""),
            Line::from(Span::styled("Filters", Style::default().fg(Color::Yellow))),
            Self::key_line("f or /", "Focus the filter form"),
            Self::key_line("Tab", "Next field"),
            Self::key_line("←/→", "Cycle level (level field)"),
            Self::key_line("Enter", "Search"),
            Self::key_line("Ctrl+x", "Clear all fields and search"),
            Self::key_line("Esc", "Back to the table"),
            Line::from(""),
            Line::from(Span::styled("General", Style::default().fg(Color::Yellow))),
            Self::key_line("?", "Toggle this help"),
            Self::key_line("q", "Quit"),
        ];

        let help_widget = Paragraph::new(help_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    " Help ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        );

        frame.render_widget(help_widget, area);
    }

    fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("  {:>8}", key), Style::default().fg(Color::Green)),
            Span::styled(format!("  {}", desc), Style::default().fg(Color::White)),
        ])
    }
}
