use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{AppState, FilterField, Focus};
use crate::ui::Theme;

/// The filter form strip: five draft fields on two rows. Purely a view over
/// the draft in `AppState`; editing happens through actions.
pub struct FilterForm;

impl FilterForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.focus == Focus::Filters;
        let loading = state.is_loading();

        let row_one = Line::from(Self::field_spans(
            state,
            &[
                FilterField::Application,
                FilterField::Environment,
                FilterField::Level,
            ],
            focused,
            loading,
        ));
        let row_two = Line::from(Self::field_spans(
            state,
            &[FilterField::From, FilterField::To],
            focused,
            loading,
        ));

        let title = if loading {
            " Filters (loading...) "
        } else {
            " Filters "
        };

        let border_style = if focused && !loading {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let form = Paragraph::new(vec![row_one, row_two]).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(title, Theme::title())),
        );

        frame.render_widget(form, area);
    }

    fn field_spans<'a>(
        state: &'a AppState,
        fields: &[FilterField],
        form_focused: bool,
        loading: bool,
    ) -> Vec<Span<'a>> {
        let mut spans = Vec::new();

        for (i, &field) in fields.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Theme::text_dim()));
            } else {
                spans.push(Span::styled(" ", Theme::text()));
            }

            let is_focused =
                form_focused && !loading && state.draft.focused == Some(field);

            spans.push(Span::styled(
                format!("{}: ", field.label()),
                Theme::text_dim(),
            ));

            let value = state.draft.display_value(field);
            let placeholder = match field {
                FilterField::Level => "all",
                FilterField::From | FilterField::To => "YYYY-MM-DDTHH:MM",
                _ => "",
            };

            let value_style = if loading {
                Theme::text_dim()
            } else if is_focused {
                Theme::text_highlight()
            } else {
                Theme::text()
            };

            if value.is_empty() && !is_focused {
                spans.push(Span::styled(placeholder, Theme::text_dim()));
            } else {
                spans.push(Span::styled(value, value_style));
            }

            // Block cursor on the focused field; level cycles instead of
            // taking typed input.
            if is_focused {
                let cursor = if field == FilterField::Level { " ◂▸" } else { "█" };
                spans.push(Span::styled(
                    cursor,
                    Style::default()
                        .fg(Theme::HIGHLIGHT)
                        .add_modifier(Modifier::SLOW_BLINK),
                ));
            }
        }

        spans
    }
}
