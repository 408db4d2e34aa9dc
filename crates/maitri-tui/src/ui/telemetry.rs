//! Telemetry rings and the stress alert panel.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

use maitri_core::types::{AlertState, RING_LABELS};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let alerting = app.alert == AlertState::Alerting;
    let border = if alerting { Color::Red } else { Color::Cyan };

    let block = Block::default()
        .title(" Telemetry ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1); RING_LABELS.len()];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, (label, value)) in RING_LABELS.iter().zip(app.telemetry.rings).enumerate() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Rgb(138, 43, 226)))
            .percent(u16::from(value.min(100)))
            .label(format!("{} {}%", label, value));
        frame.render_widget(gauge, rows[i]);
    }

    if alerting {
        let panel = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("STRESS DETECTED", Style::default().fg(Color::Red).bold()),
            Line::raw("Elevated markers across face and voice channels."),
            Line::styled("Esc to dismiss", Style::default().fg(Color::DarkGray)),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(panel, rows[RING_LABELS.len()]);
    }
}
