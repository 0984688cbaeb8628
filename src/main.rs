mod app;
mod cli;
mod color;
mod config;
mod db;
mod error;
mod event;
mod export;
mod tui;
mod types;
mod ui;

use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::db::SqliteStore;

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    let mut config = Config::load(cli_opts.config.as_deref())?;
    cli_opts.apply_overrides(&mut config);

    init_tracing(&config::default_log_path())?;

    let conn = db::init(&config.db_path)?;
    let store = SqliteStore::new(conn);
    if let Some(command) = cli_opts.command {
        return cli::run(command, &config, store);
    }

    let services = app::Services::from_config(
        &config,
        Box::new(store),
        export::detect_clipboard(),
        export::detect_share(&config.share_command),
    );
    let mut app = app::App::new(services);
    let mut terminal = tui::init()?;
    let result = event::run(&mut app, &mut terminal);

    tui::restore()?;

    result
}

/// The TUI owns stdout, so logs go to a file. `RUST_LOG` overrides the `info` default.
fn init_tracing(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
