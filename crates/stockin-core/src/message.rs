//! Chat transcript types.
//!
//! Messages are transient, render-only records: they live in an in-memory
//! transcript for the duration of a chat and are never persisted.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in the research chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Answer from the research service.
    Assistant,
    /// System-generated message.
    System,
}

/// A single message in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// An in-memory, append-only log of chat messages (the chat box).
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message to the transcript.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(MessageRole::User, content));
    }

    /// Appends an assistant message (or its error equivalent) to the transcript.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages
            .push(ChatMessage::new(MessageRole::Assistant, content));
    }

    /// Appends a system message to the transcript.
    pub fn push_system(&mut self, content: impl Into<String>) {
        self.messages
            .push(ChatMessage::new(MessageRole::System, content));
    }

    /// Iterates over the messages in insertion order.
    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_question_yields_one_user_and_one_assistant_entry() {
        let mut transcript = Transcript::new();

        transcript.push_user("(ACME - overview) What happened last quarter?");
        transcript.push_assistant("Revenue grew 4%.");

        assert_eq!(transcript.len(), 2);
        let roles: Vec<_> = transcript.messages().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
    }

    #[test]
    fn test_error_equivalent_is_an_assistant_entry() {
        let mut transcript = Transcript::new();

        transcript.push_user("(ACME - news) Anything today?");
        transcript.push_assistant("Error fetching response.");

        assert_eq!(transcript.len(), 2);
        assert_eq!(
            transcript.messages().last().unwrap().role,
            MessageRole::Assistant
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut transcript = Transcript::new();
        transcript.push_system("Session started");
        transcript.push_user("first");
        transcript.push_assistant("second");

        let contents: Vec<_> = transcript.messages().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["Session started", "first", "second"]);
    }
}
