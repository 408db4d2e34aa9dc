//! Append-only chat history.

use thiserror::Error;

use crate::responder;
use crate::types::{ChatMessage, Sender, ASSISTANT_BADGE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
}

/// Ordered chat history for the lifetime of a dashboard.
#[derive(Debug, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message, badged by its sentiment. Input is trimmed.
    pub fn push_user(&mut self, text: &str) -> Result<&ChatMessage, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let badge = responder::sentiment(text).icon;
        Ok(self.push(ChatMessage::new(Sender::User, text, badge)))
    }

    pub fn push_assistant(&mut self, text: &str) -> &ChatMessage {
        self.push(ChatMessage::new(Sender::Assistant, text, ASSISTANT_BADGE))
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
