//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

/// TUI to browse, create and edit user records served by a REST API.
#[derive(Parser, Debug, Clone)]
#[command(name = "usrapi-manager", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the users API, e.g. http://localhost:8000
    #[arg(long, env = "USERS_API_URL")]
    pub api_url: String,

    /// Append logs to this file (the terminal is taken by the UI)
    #[arg(long, env = "USERS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Theme file with `key = #RRGGBB` lines
    #[arg(long)]
    pub theme: Option<PathBuf>,

    /// Keybindings file with `Action = KeySpec` lines
    #[arg(long)]
    pub keybinds: Option<PathBuf>,
}

/// Default `RUST_LOG` directive when none is set.
pub const DEFAULT_LOG_FILTER: &str = "usrapi_manager=info";
