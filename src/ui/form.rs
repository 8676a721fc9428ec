//! Create/edit form panel.
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{AppState, Focus};
use crate::model::UserField;

/// Render each field with its inline error, then the submit/cancel controls.
pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState) {
    let form = &app.form;
    let focused_pane = app.focus == Focus::Form;
    let busy = form.submitting || app.page.is_saving();

    let mut lines: Vec<Line> = Vec::new();
    for field in UserField::ALL {
        let is_focused = focused_pane && form.focused == field;
        let marker = if is_focused { "▶ " } else { "  " };
        let label_style = if is_focused {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.title)
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{} *", field.label()), label_style),
        ]));

        let value = form.draft.get(field);
        let value_style = if form.error(field).is_some() {
            Style::default().fg(app.theme.error)
        } else {
            Style::default().fg(app.theme.text)
        };
        let shown = if value.is_empty() && !is_focused {
            Span::styled(
                format!("Enter {}", field.label().to_lowercase()),
                Style::default().fg(app.theme.muted),
            )
        } else {
            let cursor = if is_focused { "_" } else { "" };
            Span::styled(format!("{value}{cursor}"), value_style)
        };
        lines.push(Line::from(vec![Span::raw("    "), shown]));

        if let Some(err) = form.error(field) {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(err.to_string(), Style::default().fg(app.theme.error)),
            ]));
        }
    }

    lines.push(Line::raw(""));
    let button_style = if busy {
        Style::default().fg(app.theme.muted)
    } else {
        Style::default()
            .fg(app.theme.highlight_fg)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(vec![
        Span::styled(format!("[ {} ]", form.submit_label(busy)), button_style),
        Span::raw("  "),
        Span::styled("[ Cancel ]", if busy { button_style } else { Style::default().fg(app.theme.text) }),
    ]));

    let border = if focused_pane {
        app.theme.highlight_fg
    } else {
        app.theme.border
    };
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}
