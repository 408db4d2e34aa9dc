//! maitri-tui: Terminal mission-control dashboard.
//! Uses Ratatui + Crossterm for rendering.

mod app;
mod terminal;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{info, warn};

use maitri_core::config::Config;
use maitri_core::dashboard::Dashboard;
use maitri_core::runner::{self, DashboardCommand};

use app::App;
use terminal::TerminalGuard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to a file (not stdout, since we own the terminal)
    let _guard = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(|| -> Box<dyn io::Write> {
            match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open("maitri-tui.log")
            {
                Ok(f) => Box::new(f),
                Err(_) => Box::new(io::sink()),
            }
        })
        .try_init();

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match Config::load_from_dir(&project_root) {
        Ok(c) => c,
        Err(e) => {
            warn!("Using default config: {:#}", e);
            Config::default()
        }
    };

    let (handle, task) = runner::spawn(Dashboard::new(config))?;
    let mut events = handle.subscribe();
    let mut app = App::new(handle.clone()).await;

    info!("Starting MAITRI TUI");

    // Setup terminal
    let terminal_guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    loop {
        // Draw
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Handle dashboard events (non-blocking)
        loop {
            match events.try_recv() {
                Ok(ev) => app.handle_event(ev),
                Err(TryRecvError::Lagged(n)) => warn!("Skipped {} dashboard events", n),
                Err(_) => break,
            }
        }

        // Handle terminal events
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match (key.code, key.modifiers) {
                    // Quit
                    (KeyCode::Char('c'), KeyModifiers::CONTROL)
                    | (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                        app.should_quit = true;
                    }
                    // Debug handle
                    (KeyCode::Char('a'), KeyModifiers::CONTROL) => handle.trigger_alert().await,
                    (KeyCode::Esc, _) => handle.dismiss_alert().await,
                    // Focus toggle
                    (KeyCode::Tab, _) => app.toggle_focus().await,
                    // Input handling
                    (KeyCode::Enter, _) if app.input_focused => {
                        app.send_message().await;
                    }
                    (KeyCode::Char(c), _) if app.input_focused => {
                        app.input.push(c);
                    }
                    (KeyCode::Backspace, _) if app.input_focused => {
                        app.input.pop();
                    }
                    // Scroll
                    (KeyCode::Up, _) if !app.input_focused => app.scroll_up(),
                    (KeyCode::Down, _) if !app.input_focused => app.scroll_down(),
                    (KeyCode::PageUp, _) => app.scroll_up(),
                    (KeyCode::PageDown, _) => app.scroll_down(),
                    _ => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Cleanup
    drop(terminal);
    drop(terminal_guard);

    handle.send(DashboardCommand::Teardown).await;
    handle.send(DashboardCommand::Stop).await;
    let _ = task.await;

    Ok(())
}
