//! App state, input handling, event application.

use maitri_core::events::DashboardEvent;
use maitri_core::runner::{DashboardCommand, DashboardHandle};
use maitri_core::types::*;

/// The main application state.
pub struct App {
    pub handle: DashboardHandle,
    pub messages: Vec<ChatMessage>,
    pub alert: AlertState,
    pub confidence_tag: String,
    pub telemetry: TelemetrySnapshot,
    pub typing: bool,
    pub scroll_offset: usize,
    pub input: String,
    pub input_focused: bool,
    pub should_quit: bool,
}

impl App {
    /// Build the view and tell the dashboard where focus starts.
    pub async fn new(handle: DashboardHandle) -> Self {
        let telemetry = TelemetrySnapshot::default();
        let app = App {
            handle,
            messages: Vec::new(),
            alert: AlertState::Calm,
            confidence_tag: telemetry.confidence_tag(),
            telemetry,
            typing: false,
            scroll_offset: 0,
            input: String::new(),
            input_focused: true,
            should_quit: false,
        };
        app.handle
            .send(DashboardCommand::SetInputFocus(app.input_focused))
            .await;
        app
    }

    /// Apply a dashboard event to the view.
    pub fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Message(msg) => {
                self.messages.push(msg);
                // Auto-scroll to bottom
                self.scroll_offset = 0;
            }
            DashboardEvent::Typing(t) => {
                self.typing = t.active;
            }
            DashboardEvent::Alert(a) => {
                self.alert = a.state;
                self.confidence_tag = a.confidence_tag;
            }
            DashboardEvent::Telemetry(t) => {
                // The stress tag stays up for the whole alert.
                if self.alert == AlertState::Calm {
                    self.confidence_tag = t.confidence_tag();
                }
                self.telemetry = t;
            }
        }
    }

    /// Send the input line to the dashboard.
    pub async fn send_message(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.input);
        self.handle.send(DashboardCommand::Submit(text)).await;
    }

    pub async fn toggle_focus(&mut self) {
        self.input_focused = !self.input_focused;
        self.handle
            .send(DashboardCommand::SetInputFocus(self.input_focused))
            .await;
    }

    /// Title for the input bar. An open alert takes priority over the key help.
    pub fn input_hint(&self) -> &'static str {
        if self.alert == AlertState::Alerting {
            " Stress alert active (Esc dismiss) "
        } else if self.typing {
            " MAITRI is analyzing... "
        } else if self.input_focused {
            " Message (Enter send, Tab focus, Ctrl+A alert, Esc dismiss) "
        } else {
            " Tab to type, Up/Down scroll "
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }
}
