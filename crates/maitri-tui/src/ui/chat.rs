//! Scrollable chat feed: crew messages and MAITRI replies.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use maitri_core::types::Sender;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Comms ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    if app.messages.is_empty() {
        lines.push(Line::styled(
            "MAITRI online. Say hello.",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        // Bottom-up with scroll offset
        let visible_height = inner.height as usize;
        let total = app.messages.len();
        let end = total.saturating_sub(app.scroll_offset);
        let start = end.saturating_sub(visible_height * 2); // overshoot for wrapping

        for msg in &app.messages[start..end] {
            let (fg, prefix) = match msg.sender {
                Sender::User => (Color::Yellow, "< "),
                Sender::Assistant => (Color::Cyan, "> "),
            };
            lines.push(Line::styled(
                format!("{}{}  {}", prefix, msg.text, msg.badge),
                Style::default().fg(fg),
            ));
        }
    }

    if app.typing {
        lines.push(Line::styled(
            "> MAITRI is analyzing...",
            Style::default().fg(Color::DarkGray).italic(),
        ));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}
