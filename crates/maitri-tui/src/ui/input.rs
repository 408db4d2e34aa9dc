//! Message line. Dims while a stress alert is on screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use maitri_core::types::AlertState;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let alerting = app.alert == AlertState::Alerting;

    let border_style = match (alerting, app.input_focused) {
        (true, _) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let text_style = if alerting {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::White)
    };

    let block = Block::default()
        .title(app.input_hint())
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Keep the tail of long input visible.
    let width = inner.width.saturating_sub(1) as usize;
    let len = app.input.chars().count();
    let skip = len.saturating_sub(width);
    let visible: String = app.input.chars().skip(skip).collect();

    let line = if visible.is_empty() && !app.input_focused {
        Line::from(Span::styled(
            "comms standing by",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(visible, text_style))
    };
    frame.render_widget(Paragraph::new(line), inner);

    if app.input_focused {
        frame.set_cursor_position(Position::new(
            inner.x + (len - skip) as u16,
            inner.y,
        ));
    }
}
