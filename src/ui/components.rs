//! Shared UI components (status bar, notice modal, layout helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::page::{Notice, NoticeKind};
use crate::app::{AppState, Focus};

/// Key hints for the focused pane, built from the active keymap.
pub fn key_hints(app: &AppState) -> String {
    let keys = |action: KeyAction| app.keymap.keys_for(action).join("/");
    // printable keys are typed into the form, so they never act there
    let form_keys = |action: KeyAction| {
        app.keymap
            .keys_for(action)
            .into_iter()
            .filter(|k| k.chars().count() > 1 && k != "Space")
            .collect::<Vec<_>>()
            .join("/")
    };
    match app.focus {
        Focus::Table => format!(
            "{}: edit  {}: columns  {}: form  {}: quit",
            keys(KeyAction::Activate),
            keys(KeyAction::ToggleColumns),
            keys(KeyAction::SwitchFocus),
            keys(KeyAction::Quit),
        ),
        Focus::Form => format!(
            "{}: submit  {}/{}: field  {}: cancel  {}: table",
            form_keys(KeyAction::Activate),
            form_keys(KeyAction::MoveUp),
            form_keys(KeyAction::MoveDown),
            form_keys(KeyAction::Cancel),
            form_keys(KeyAction::SwitchFocus),
        ),
    }
}

/// Render the bottom status bar with focus, counts and key hints.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let focus = match app.focus {
        Focus::Table => "TABLE",
        Focus::Form => "FORM",
    };
    let saving = if app.page.is_saving() { "  saving..." } else { "" };
    let msg = format!(
        "mode: {focus}  users:{}  columns:{}{saving}  {}",
        app.users().len(),
        app.columns.visible().len(),
        key_hints(app),
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the front notice; Esc or Enter dismisses it.
pub fn render_notice_modal(f: &mut Frame, area: Rect, app: &AppState, notice: &Notice) {
    let max_w = area.width.saturating_sub(6).max(30);
    let width = 50u16.min(max_w);
    let approx_lines = (notice.message.len() as u16 / width.saturating_sub(4).max(10)).max(1);
    let height = (approx_lines + 5).min(area.height.saturating_sub(4).max(5));
    let rect = centered_rect(width, height, area);

    let color = match notice.kind {
        NoticeKind::Success => app.theme.success,
        NoticeKind::Error => app.theme.error,
    };
    let pending = app.page.notices.len().saturating_sub(1);
    let mut lines = vec![
        Line::from(Span::styled(
            notice.message.clone(),
            Style::default().fg(color),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Esc / Enter to dismiss",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    if pending > 0 {
        lines.push(Line::raw(format!("({pending} more)")));
    }
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(notice.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
