//! Screen layout: header, users table with details, form, status bar, and
//! overlays for the column menu and notices.
//!
pub mod components;
pub mod form;
pub mod table;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8), Constraint::Length(1)])
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(root[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(8)])
        .split(body[0]);

    let header = Paragraph::new(format!(
        "User Management  api: {}  users: {}",
        app.api_url,
        app.users().len()
    ))
    .block(
        Block::default()
            .title("usrapi-manager")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(header, root[0]);

    users::render_users_table(f, left[0], app);
    users::render_user_details(f, left[1], app);
    form::render_user_form(f, body[1], app);
    components::render_status_bar(f, root[2], app);

    if let Some(selected) = app.column_menu {
        users::render_column_menu(f, f.area(), app, selected);
    }
    if let Some(notice) = app.page.current_notice() {
        components::render_notice_modal(f, f.area(), app, notice);
    }
}
