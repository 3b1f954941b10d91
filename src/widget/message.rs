//! Transcript message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ChatTurn;

/// Message role in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    /// Map a wire-level role name onto the transcript roles.
    ///
    /// Unknown names become system messages rather than being dropped.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "tool" => Role::Tool,
            _ => Role::System,
        }
    }
}

/// One entry of the transcript. Immutable once constructed; ordering is
/// append-only and chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,

    /// Surfaces with a markdown capability may render this message as rich
    /// text; plain-text surfaces ignore the flag.
    pub rich_text: bool,

    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>, rich_text: bool) -> Self {
        Self {
            role,
            content: content.into(),
            rich_text,
            timestamp: Utc::now(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content, false)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, false)
    }

    /// Create an assistant message (rendered as rich text where supported)
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, true)
    }

    /// Create a tool message
    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(Role::Tool, content, false)
    }

    /// Convert one wire-level reply turn into a transcript message.
    pub fn from_turn(turn: ChatTurn) -> Self {
        let role = Role::from_wire(&turn.role);
        let rich_text = role == Role::Assistant;
        Self::new(role, turn.content, rich_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert!(!msg.rich_text);
    }

    #[test]
    fn test_assistant_messages_are_rich_text() {
        assert!(Message::assistant("**hi**").rich_text);
        assert!(!Message::system("notice").rich_text);
    }

    #[test]
    fn test_role_from_wire() {
        assert_eq!(Role::from_wire("assistant"), Role::Assistant);
        assert_eq!(Role::from_wire("tool"), Role::Tool);
        assert_eq!(Role::from_wire("user"), Role::User);
        assert_eq!(Role::from_wire("moderator"), Role::System);
    }

    #[test]
    fn test_from_turn_flags_assistant_only() {
        let assistant = Message::from_turn(ChatTurn {
            role: "assistant".to_string(),
            content: "hi".to_string(),
        });
        assert!(assistant.rich_text);

        let tool = Message::from_turn(ChatTurn {
            role: "tool".to_string(),
            content: "ran".to_string(),
        });
        assert_eq!(tool.role, Role::Tool);
        assert!(!tool.rich_text);
    }
}
