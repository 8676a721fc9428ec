//! Users table, selected-record details and the column visibility menu.
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::app::{AppState, Focus};
use crate::ui::components::centered_rect;
use crate::ui::table::{Column, LOADING_USERS, NO_USERS, TableModel, table_model};

fn column_width(column: Column) -> Constraint {
    match column {
        Column::Uuid => Constraint::Length(10),
        Column::Name | Column::Surname => Constraint::Min(10),
        Column::Email => Constraint::Min(18),
        Column::Company | Column::JobTitle => Constraint::Min(12),
    }
}

/// Render the users table, paging so the selected row stays visible.
pub fn render_users_table(f: &mut Frame, area: Rect, app: &AppState) {
    let border = if app.focus == Focus::Table {
        app.theme.highlight_fg
    } else {
        app.theme.border
    };
    let block = Block::default()
        .title(format!("Users Table ({} users)", app.users().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let model = table_model(app.users(), app.page.list.loading, &app.columns);
    let (columns, rows) = match model {
        TableModel::Loading => {
            let p = Paragraph::new(LOADING_USERS)
                .alignment(Alignment::Center)
                .style(Style::default().fg(app.theme.muted))
                .block(block);
            f.render_widget(p, area);
            return;
        }
        TableModel::Empty => {
            let p = Paragraph::new(NO_USERS)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(app.theme.muted))
                .block(block);
            f.render_widget(p, area);
            return;
        }
        TableModel::Rows { columns, rows } => (columns, rows),
    };

    let rows_per_page = (area.height.saturating_sub(3) as usize).max(1);
    let start = (app.selected_user_index / rows_per_page) * rows_per_page;
    let end = (start + rows_per_page).min(rows.len());

    let body = rows[start..end].iter().enumerate().map(|(i, cells)| {
        let style = if start + i == app.selected_user_index {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(cells.iter().cloned().map(Cell::from)).style(style)
    });

    let widths: Vec<Constraint> = if columns.is_empty() {
        vec![Constraint::Percentage(100)]
    } else {
        columns.iter().map(|c| column_width(*c)).collect()
    };
    let header = Row::new(columns.iter().map(|c| c.header())).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

/// Every field of the selected record, including the full id.
pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.selected_user() {
        Some(u) if !app.page.list.loading => format!(
            "UUID: {}\nName: {} {}\nEmail: {}\nCompany: {}\nJob Title: {}",
            u.id,
            u.name,
            u.surname,
            u.email,
            u.company.as_deref().unwrap_or(""),
            u.job_title.as_deref().unwrap_or(""),
        ),
        _ => String::new(),
    };
    let p = Paragraph::new(text)
        .style(Style::default().fg(app.theme.text))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}

pub fn render_column_menu(f: &mut Frame, area: Rect, app: &AppState, selected: usize) {
    let rect = centered_rect(30, (Column::ALL.len() + 2) as u16, area);
    let mut text = String::new();
    for (idx, column) in Column::ALL.iter().enumerate() {
        let marker = if idx == selected { "▶" } else { " " };
        let checkbox = if app.columns.is_visible(*column) { "[x]" } else { "[ ]" };
        text.push_str(&format!("{} {} {}\n", marker, checkbox, column.header()));
    }
    let p = Paragraph::new(text).block(
        Block::default()
            .title("Columns")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
