//! Keybinding configuration: defaults, an optional `keybinds.conf` override,
//! and key-to-action resolution.
//!
//! Printable characters typed while the form has focus go into the focused
//! field and never reach the keymap; everything else is resolved here.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

/// Semantic actions. What an action does can depend on which pane has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Move focus between the users table and the form.
    SwitchFocus,
    /// Previous row in the table, previous field in the form.
    MoveUp,
    /// Next row in the table, next field in the form.
    MoveDown,
    /// Edit the selected row in the table, submit in the form.
    Activate,
    /// Open the column visibility menu.
    ToggleColumns,
    /// Cancel editing / close a menu.
    Cancel,
}

#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Tab), KeyAction::SwitchFocus);
        bindings.insert((M::NONE, BackTab), KeyAction::SwitchFocus);
        // Some terminals report BackTab with SHIFT
        bindings.insert((M::SHIFT, BackTab), KeyAction::SwitchFocus);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Enter), KeyAction::Activate);
        bindings.insert((M::NONE, Char(' ')), KeyAction::Activate);
        bindings.insert((M::CONTROL, Char('s')), KeyAction::Activate);
        bindings.insert((M::NONE, Char('c')), KeyAction::ToggleColumns);
        bindings.insert((M::NONE, Esc), KeyAction::Cancel);
        Self { bindings }
    }

    /// Defaults, overridden by `path` when given and readable.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::from_file(p).unwrap_or_else(|| {
                warn!(path = %p.display(), "keybindings file unreadable, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Parse `<Action> = <KeySpec>` lines on top of the defaults.
    /// Returns `None` if the file cannot be read.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::from_config_str(&contents))
    }

    pub fn from_config_str(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => warn!(line, "ignoring keybinding line"),
            }
        }
        map
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// All keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Human-readable spec like "Ctrl+q" or "Enter".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Char(' ') => "Space".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Space" => Char(' '),
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "SwitchFocus" => Some(KeyAction::SwitchFocus),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "Activate" => Some(KeyAction::Activate),
        "ToggleColumns" => Some(KeyAction::ToggleColumns),
        "Cancel" => Some(KeyAction::Cancel),
        _ => None,
    }
}
