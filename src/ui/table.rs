//! Users table model: which columns show and what each cell says.
//!
//! Kept free of ratatui types so it can be checked without a terminal;
//! [`crate::ui::users`] turns a [`TableModel`] into widgets.

use crate::model::User;

pub const NO_USERS: &str = "No users found. Add your first user using the form.";
pub const LOADING_USERS: &str = "Loading users...";

/// Number of id characters shown before the ellipsis.
pub const ID_PREFIX_LEN: usize = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Uuid,
    Name,
    Surname,
    Email,
    Company,
    JobTitle,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Uuid,
        Column::Name,
        Column::Surname,
        Column::Email,
        Column::Company,
        Column::JobTitle,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Uuid => "UUID",
            Column::Name => "Name",
            Column::Surname => "Surname",
            Column::Email => "Email",
            Column::Company => "Company",
            Column::JobTitle => "Job Title",
        }
    }

    pub fn cell(self, user: &User) -> String {
        match self {
            Column::Uuid => short_id(&user.id),
            Column::Name => user.name.clone(),
            Column::Surname => user.surname.clone(),
            Column::Email => user.email.clone(),
            Column::Company => user.company.clone().unwrap_or_default(),
            Column::JobTitle => user.job_title.clone().unwrap_or_default(),
        }
    }
}

/// First six characters of an id followed by `...`.
pub fn short_id(id: &str) -> String {
    let prefix: String = id.chars().take(ID_PREFIX_LEN).collect();
    format!("{prefix}...")
}

/// Per-column on/off switches. Session-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnVisibility {
    shown: [bool; 6],
}

impl Default for ColumnVisibility {
    fn default() -> Self {
        // uuid, name, surname, email on; company, job title off
        Self {
            shown: [true, true, true, true, false, false],
        }
    }
}

impl ColumnVisibility {
    fn index(column: Column) -> usize {
        match column {
            Column::Uuid => 0,
            Column::Name => 1,
            Column::Surname => 2,
            Column::Email => 3,
            Column::Company => 4,
            Column::JobTitle => 5,
        }
    }

    pub fn is_visible(&self, column: Column) -> bool {
        self.shown[Self::index(column)]
    }

    pub fn toggle(&mut self, column: Column) {
        let i = Self::index(column);
        self.shown[i] = !self.shown[i];
    }

    pub fn visible(&self) -> Vec<Column> {
        Column::ALL.into_iter().filter(|c| self.is_visible(*c)).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableModel {
    Loading,
    Empty,
    Rows {
        columns: Vec<Column>,
        rows: Vec<Vec<String>>,
    },
}

pub fn table_model(users: &[User], loading: bool, visibility: &ColumnVisibility) -> TableModel {
    if loading {
        return TableModel::Loading;
    }
    if users.is_empty() {
        return TableModel::Empty;
    }
    let columns = visibility.visible();
    let rows = users
        .iter()
        .map(|u| columns.iter().map(|c| c.cell(u)).collect())
        .collect();
    TableModel::Rows { columns, rows }
}
