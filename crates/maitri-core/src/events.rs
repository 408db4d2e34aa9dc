//! DashboardEvent enum, broadcast from the Dashboard to frontends via tokio::broadcast.

use serde::{Deserialize, Serialize};

use crate::types::{AlertData, ChatMessage, TelemetrySnapshot, TypingData};

/// Events broadcast from a Dashboard to all subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum DashboardEvent {
    /// A new chat history entry (user or assistant)
    #[serde(rename = "message")]
    Message(ChatMessage),

    /// Typing indicator toggled while a reply is pending
    #[serde(rename = "typing")]
    Typing(TypingData),

    /// Alert raised or dismissed
    #[serde(rename = "alert")]
    Alert(AlertData),

    /// Cosmetic telemetry refresh
    #[serde(rename = "telemetry")]
    Telemetry(TelemetrySnapshot),
}

impl DashboardEvent {
    /// Serialize to `{"event": "...", "data": {...}}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
