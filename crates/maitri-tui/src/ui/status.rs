//! Status bar: UTC clock, alert state, confidence tag.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use maitri_core::types::AlertState;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let clock = chrono::Utc::now().format("%H:%M:%S").to_string();

    let (state_str, state_color) = match app.alert {
        AlertState::Calm => ("nominal", Color::Green),
        AlertState::Alerting => ("STRESS ALERT", Color::Red),
    };

    let spans = vec![
        Span::styled(" MAITRI ", Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(format!(" {} UTC ", clock)),
        Span::styled(
            format!(" {} ", state_str),
            Style::default().fg(Color::Black).bg(state_color),
        ),
        Span::styled(
            format!(" {} ", app.confidence_tag),
            Style::default().fg(Color::Magenta),
        ),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
