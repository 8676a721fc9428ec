use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::UserApi;
use crate::app::form::FormEvent;
use crate::app::keymap::KeyAction;
use crate::app::page::{self, Command, PageEvent};
use crate::app::{AppState, Focus};
use crate::ui;
use crate::ui::table::Column;

/// Result of handling one key press.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue(Option<Command>),
    Quit,
}

/// Run the UI until the user quits. Backend calls are spawned on `runtime`
/// and their results come back through a channel drained every iteration,
/// so all state changes happen on this thread.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    runtime: &Handle,
    api: Arc<dyn UserApi>,
    mut app: AppState,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<PageEvent>();
    let spawn = |command: Command| {
        let api = Arc::clone(&api);
        let tx = tx.clone();
        debug!(?command, "spawning backend call");
        runtime.spawn(async move {
            let event = page::execute(api.as_ref(), command).await;
            // receiver is gone once the UI has quit
            let _ = tx.send(event);
        });
    };

    if let Some(command) = app.page_event(PageEvent::Mounted, Instant::now()) {
        spawn(command);
    }

    loop {
        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        while let Ok(event) = rx.try_recv() {
            if let Some(command) = app.page_event(event, Instant::now()) {
                spawn(command);
            }
        }
        app.form_event(FormEvent::Tick(Instant::now()), Instant::now());

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_key(&mut app, key, Instant::now()) {
                        KeyOutcome::Quit => break,
                        KeyOutcome::Continue(Some(command)) => spawn(command),
                        KeyOutcome::Continue(None) => {}
                    }
                }
            }
        }
    }

    Ok(())
}

/// Route a key press to the notice, the column menu, the form or the table.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> KeyOutcome {
    let action = app.keymap.resolve(&key);

    if app.page.current_notice().is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                app.page_event(PageEvent::DismissNotice, now);
            }
            _ if action == Some(KeyAction::Quit) && key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyOutcome::Quit;
            }
            _ => {}
        }
        return KeyOutcome::Continue(None);
    }

    if let Some(selected) = app.column_menu {
        match action {
            Some(KeyAction::MoveUp) => app.column_menu = Some(selected.saturating_sub(1)),
            Some(KeyAction::MoveDown) => {
                app.column_menu = Some((selected + 1).min(Column::ALL.len() - 1));
            }
            Some(KeyAction::Activate) => app.toggle_column_at(selected),
            Some(KeyAction::Cancel) | Some(KeyAction::ToggleColumns) => app.column_menu = None,
            Some(KeyAction::Quit) => return KeyOutcome::Quit,
            _ => {}
        }
        return KeyOutcome::Continue(None);
    }

    match app.focus {
        Focus::Form => handle_form_key(app, key, action, now),
        Focus::Table => handle_table_key(app, action, now),
    }
}

fn handle_form_key(
    app: &mut AppState,
    key: KeyEvent,
    action: Option<KeyAction>,
    now: Instant,
) -> KeyOutcome {
    let field = app.form.focused;
    let typed = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Char(c) if typed => {
            let mut value = app.form.draft.get(field).to_string();
            value.push(c);
            return KeyOutcome::Continue(app.form_event(FormEvent::Input { field, value }, now));
        }
        KeyCode::Backspace => {
            let mut value = app.form.draft.get(field).to_string();
            value.pop();
            return KeyOutcome::Continue(app.form_event(FormEvent::Input { field, value }, now));
        }
        _ => {}
    }
    let command = match action {
        Some(KeyAction::Quit) => return KeyOutcome::Quit,
        Some(KeyAction::SwitchFocus) => {
            app.focus = Focus::Table;
            None
        }
        Some(KeyAction::MoveUp) => app.form_event(FormEvent::FocusPrev, now),
        Some(KeyAction::MoveDown) => app.form_event(FormEvent::FocusNext, now),
        Some(KeyAction::Activate) => app.form_event(FormEvent::Submit, now),
        Some(KeyAction::Cancel) => app.form_event(FormEvent::Cancel, now),
        Some(KeyAction::ToggleColumns) | None => None,
    };
    KeyOutcome::Continue(command)
}

fn handle_table_key(app: &mut AppState, action: Option<KeyAction>, now: Instant) -> KeyOutcome {
    let command = match action {
        Some(KeyAction::Quit) => return KeyOutcome::Quit,
        Some(KeyAction::SwitchFocus) => {
            app.focus = Focus::Form;
            None
        }
        Some(KeyAction::MoveUp) => {
            app.selected_user_index = app.selected_user_index.saturating_sub(1);
            None
        }
        Some(KeyAction::MoveDown) => {
            if app.selected_user_index + 1 < app.users().len() {
                app.selected_user_index += 1;
            }
            None
        }
        Some(KeyAction::Activate) => {
            let target = if app.page.list.loading {
                None
            } else {
                app.selected_user().cloned()
            };
            match target {
                Some(user) => {
                    app.focus = Focus::Form;
                    app.page_event(PageEvent::EditRequested(user), now)
                }
                None => None,
            }
        }
        Some(KeyAction::ToggleColumns) => {
            app.column_menu = Some(0);
            None
        }
        // leaves edit mode; an unsaved create draft is only cleared from the form
        Some(KeyAction::Cancel) if app.form.is_editing() => {
            app.form_event(FormEvent::Cancel, now)
        }
        Some(KeyAction::Cancel) | None => None,
    };
    KeyOutcome::Continue(command)
}
