//! Application state types and entry glue.
//!
//! [`AppState`] composes the page controller, the form and the table view
//! state, and routes outcomes between them. The event loop itself lives in
//! [`update`] (re-exported as `run`).
//!
pub mod form;
pub mod keymap;
pub mod list;
pub mod page;
pub mod update;

use std::path::Path;
use std::time::Instant;

use ratatui::style::Color;
use tracing::warn;

use crate::api::UserApi;
use crate::model::User;
use crate::ui::table::{Column, ColumnVisibility};
use form::{FormEvent, FormOutcome, FormState};
use keymap::Keymap;
use page::{Command, PageEvent, PageOutcome, PageState};

/// Which pane receives key presses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Table,
    Form,
}

/// Color palette for the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    /// Plain named-color theme for terminals without truecolor.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Catppuccin Mocha, the default.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
            success: Color::Rgb(0xa6, 0xe3, 0xa1),      // green
        }
    }

    /// Theme from `path`, or Mocha when no path is given or it can't be read.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(p) = path else {
            return Self::mocha();
        };
        match std::fs::read_to_string(p) {
            Ok(contents) => Self::from_config_str(&contents),
            Err(e) => {
                warn!(path = %p.display(), error = %e, "theme file unreadable, using defaults");
                Self::mocha()
            }
        }
    }

    /// Parse `key = color` lines over the Mocha defaults. Unknown keys and
    /// unparsable colors are skipped.
    pub fn from_config_str(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let Some(color) = Self::parse_color(val) else {
                continue;
            };
            let slot = match key.trim() {
                "text" => &mut theme.text,
                "muted" => &mut theme.muted,
                "title" => &mut theme.title,
                "border" => &mut theme.border,
                "header_bg" => &mut theme.header_bg,
                "header_fg" => &mut theme.header_fg,
                "status_bg" => &mut theme.status_bg,
                "status_fg" => &mut theme.status_fg,
                "highlight_fg" => &mut theme.highlight_fg,
                "highlight_bg" => &mut theme.highlight_bg,
                "error" => &mut theme.error,
                "success" => &mut theme.success,
                _ => continue,
            };
            *slot = color;
        }
        theme
    }

    /// Hex (`#RRGGBB` or `RRGGBB`) or `reset`.
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Everything the screen shows: controller, form, column visibility,
/// selection, focus and the loaded theme and keymap.
pub struct AppState {
    pub api_url: String,
    pub page: PageState,
    pub form: FormState,
    pub columns: ColumnVisibility,
    /// Highlighted entry of the open column menu, if any.
    pub column_menu: Option<usize>,
    pub selected_user_index: usize,
    pub focus: Focus,
    pub theme: Theme,
    pub keymap: Keymap,
}

impl AppState {
    /// Fresh state before the initial fetch. Focus starts on the table.
    pub fn new(api_url: impl Into<String>, theme: Theme, keymap: Keymap) -> Self {
        Self {
            api_url: api_url.into(),
            page: PageState::new(),
            form: FormState::default(),
            columns: ColumnVisibility::default(),
            column_menu: None,
            selected_user_index: 0,
            focus: Focus::Table,
            theme,
            keymap,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.page.list.users
    }

    /// Record under the table cursor.
    pub fn selected_user(&self) -> Option<&User> {
        self.users().get(self.selected_user_index)
    }

    /// Feed a controller event; returns backend work to run, if any.
    pub fn page_event(&mut self, event: PageEvent, now: Instant) -> Option<Command> {
        let editing_before = self.page.editing.clone();
        let submitted = matches!(event, PageEvent::SubmitRequested(_));
        let mut command = None;
        match self.page.apply(event) {
            PageOutcome::Run(c) => command = Some(c),
            PageOutcome::SaveFinished { success } => {
                self.apply_form(FormEvent::SubmitFinished { success, now });
            }
            PageOutcome::None if submitted => {
                // controller refused the submission; release the form
                self.apply_form(FormEvent::SubmitFinished { success: false, now });
            }
            PageOutcome::None => {}
        }
        if self.page.editing != editing_before {
            let editing = self.page.editing.clone();
            self.apply_form(FormEvent::Load(editing));
        }
        self.clamp_selection();
        command
    }

    /// Feed a form event; submissions and cancels are forwarded to the controller.
    pub fn form_event(&mut self, event: FormEvent, now: Instant) -> Option<Command> {
        match self.apply_form(event) {
            FormOutcome::None => None,
            FormOutcome::Submit(submission) => {
                self.page_event(PageEvent::SubmitRequested(submission), now)
            }
            FormOutcome::CancelEdit => self.page_event(PageEvent::CancelEdit, now),
        }
    }

    fn apply_form(&mut self, event: FormEvent) -> FormOutcome {
        let (form, outcome) = std::mem::take(&mut self.form).apply(event);
        self.form = form;
        outcome
    }

    /// Run `command` and everything it leads to against `api`, in order.
    pub async fn drive<A: UserApi + ?Sized>(&mut self, api: &A, mut command: Option<Command>) {
        while let Some(c) = command {
            let event = page::execute(api, c).await;
            command = self.page_event(event, Instant::now());
        }
    }

    /// Flip the column at `index` in the column menu order.
    pub fn toggle_column_at(&mut self, index: usize) {
        if let Some(column) = Column::ALL.get(index) {
            self.columns.toggle(*column);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.users().len();
        if self.selected_user_index >= len {
            self.selected_user_index = len.saturating_sub(1);
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
