//! Core types: Sender, ChatMessage, AlertState, Sentiment, telemetry, mood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Chat ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Assistant => write!(f, "assistant"),
        }
    }
}

/// Badge shown next to every assistant message.
pub const ASSISTANT_BADGE: &str = "🛰️";

/// One entry of the chat history. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub badge: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>, badge: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            badge: badge.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ── Sentiment ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentKind {
    Stress,
    Positive,
    Question,
    Neutral,
}

impl SentimentKind {
    pub fn icon(self) -> &'static str {
        match self {
            SentimentKind::Stress => "😰",
            SentimentKind::Positive => "😊",
            SentimentKind::Question => "🤔",
            SentimentKind::Neutral => "😐",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sentiment {
    pub kind: SentimentKind,
    pub icon: &'static str,
}

impl From<SentimentKind> for Sentiment {
    fn from(kind: SentimentKind) -> Self {
        Self {
            kind,
            icon: kind.icon(),
        }
    }
}

// ── Alert ──

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    #[default]
    Calm,
    Alerting,
}

impl std::fmt::Display for AlertState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertState::Calm => write!(f, "calm"),
            AlertState::Alerting => write!(f, "alerting"),
        }
    }
}

/// Display state published on every alert transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMood {
    Stress,
    Calm,
}

impl DisplayMood {
    /// Text for the confidence tag while this mood is shown.
    pub fn confidence_tag(self) -> &'static str {
        match self {
            DisplayMood::Stress => "CNN 88% · stress detected",
            DisplayMood::Calm => "CNN 94% · calm",
        }
    }
}

// ── Telemetry ──

pub const EMOTION_LABELS: &[&str] = &["calm", "focused", "neutral", "alert"];

/// Ring gauges in display order.
pub const RING_LABELS: [&str; 4] = ["face", "voice", "text", "unified"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub confidence: u8,
    pub emotion: String,
    pub rings: [u8; 4],
}

impl TelemetrySnapshot {
    pub fn confidence_tag(&self) -> String {
        format!("CNN {}% · {}", self.confidence, self.emotion)
    }
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self {
            confidence: 94,
            emotion: "calm".to_string(),
            rings: [80, 72, 82, 85],
        }
    }
}

// ── Events payloads (broadcast from Dashboard to frontends) ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertData {
    pub state: AlertState,
    pub mood: DisplayMood,
    pub confidence_tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingData {
    pub active: bool,
}

// ── Debug handle view ──

/// Read-only view of the dashboard for inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub alert: AlertState,
    pub typing: bool,
    pub input_focused: bool,
    pub message_count: usize,
    pub telemetry: TelemetrySnapshot,
    pub telemetry_running: bool,
    pub elapsed_ms: u64,
}
