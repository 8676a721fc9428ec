//! usrapi-manager binary entry point.
//!
//! Parses the command line, sets up file logging and the async runtime,
//! runs the TUI event loop, and restores the terminal state on exit.
//!
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_subscriber::EnvFilter;

use usrapi_manager::api::HttpUserApi;
use usrapi_manager::app::{self, AppState, Theme, keymap::Keymap};
use usrapi_manager::config::{Cli, DEFAULT_LOG_FILTER};

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Send tracing output to `path`; stdout belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    let api = HttpUserApi::new(&cli.api_url).context("invalid --api-url")?;
    info!(url = api.users_url(), "starting");
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build async runtime")?;

    let theme = Theme::load(cli.theme.as_deref());
    let keymap = Keymap::load(cli.keybinds.as_deref());
    let state = AppState::new(cli.api_url.clone(), theme, keymap);

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, runtime.handle(), Arc::new(api), state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
