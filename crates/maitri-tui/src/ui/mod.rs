//! TUI layout compositing: assembles all UI panels.

mod chat;
mod input;
mod status;
mod telemetry;

use ratatui::prelude::*;

use crate::app::App;

/// Render the full TUI layout.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // ┌──────────────────────────────────┐
    // │ Status bar (clock, alert)        │
    // ├────────────┬─────────────────────┤
    // │ Telemetry  │     Chat feed       │
    // │  + alert   │                     │
    // │            │                     │
    // ├────────────┴─────────────────────┤
    // │ Input                            │
    // └──────────────────────────────────┘

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),   // status
            Constraint::Min(10),     // content
            Constraint::Length(3),   // input
        ])
        .split(area);

    status::draw(frame, app, main_layout[0]);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30), // telemetry
            Constraint::Min(30),    // chat
        ])
        .split(main_layout[1]);

    telemetry::draw(frame, app, content_layout[0]);
    chat::draw(frame, app, content_layout[1]);

    input::draw(frame, app, main_layout[2]);
}
