mod app;
mod config;
mod error;
mod events;
mod form;
mod ledger;
mod log;
mod picker;
mod report;
mod tui;

use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;

use app::App;
use config::Config;
use error::LedgerError;
use events::EventHandler;
use ledger::LedgerStore;

fn print_usage() {
    println!("Usage: ledger [--file|-f <path>]");
    println!();
    println!("Options:");
    println!("  -f, --file <path>  Ledger file (default: ~/.ledger/transactions.csv)");
    println!("  -h, --help         Show this help");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut file_override: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    file_override = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                    continue;
                } else {
                    eprintln!("Warning: --file requires a path argument");
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            arg => {
                eprintln!("Warning: ignoring unknown argument '{}'", arg);
            }
        }
        i += 1;
    }

    // Config precedence: CLI > env var > config file > default
    let config = Config::load().with_overrides(file_override);

    // Initialize logging and panic hook
    if let Ok(log_path) = log::init(&config.log_dir()) {
        log::log(&format!("Log file: {}", log_path.display()));
        log::install_panic_hook();
    }

    let ledger_path = config.ledger_file();
    let store = open_store(&ledger_path)
        .with_context(|| format!("Failed to open ledger {}", ledger_path.display()))?;

    let mut terminal = setup_terminal()?;

    // Create app state
    let mut app = App::new(store, config.default_time());

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::log("=== ledger exiting ===");
    result
}

fn open_store(path: &std::path::Path) -> error::Result<LedgerStore> {
    let store = LedgerStore::open(path)?;
    log::log_event(&format!("Ledger open: {} rows", store.len()));
    Ok(store)
}

fn setup_terminal() -> error::Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    let terminal_err = |e: std::io::Error| LedgerError::Terminal(e.to_string());
    enable_raw_mode().map_err(terminal_err)?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).map_err(terminal_err)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(terminal_err)
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Event stream for keyboard
    let mut event_stream = EventStream::new();

    loop {
        // Render
        terminal.draw(|frame| tui::ui::render(frame, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        let action = EventHandler::handle_event(app, &event);
                        app.dispatch(action);
                    }
                    Some(Err(e)) => log::log(&format!("Event stream error: {}", e)),
                    None => break,
                }
            }

            // Timeout to keep UI responsive to resizes
            _ = tokio::time::sleep(Duration::from_millis(250)) => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
