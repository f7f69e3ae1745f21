//! Conversation message types.
//!
//! The original assistant kept its chat history as untyped framework message
//! objects and smuggled tool results through assistant messages prefixed with
//! `"Thought:"`. Here the roles are a proper enum, with the thought entries
//! given their own role so rendering surfaces never have to guess.

use serde::{Deserialize, Serialize};

/// Marker prefix for internal tool-result messages.
///
/// A message whose content starts with this prefix is model-visible context
/// but is never shown to the user.
pub const THOUGHT_PREFIX: &str = "Thought:";

// ─────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────

/// Who authored a message.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The system prompt seeded at the start of a conversation.
    System,
    /// Input typed by the user.
    User,
    /// A reply produced by the model.
    Assistant,
    /// An internal tool-result record appended by the agent loop.
    Thought,
}

// ─────────────────────────────────────────────
// Message
// ─────────────────────────────────────────────

/// One entry in the conversation log.
///
/// Messages are never mutated after creation; the transcript only grows.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Create a thought message recording a tool execution.
    ///
    /// The content is expected to carry the [`THOUGHT_PREFIX`] marker; the
    /// agent loop formats it that way.
    pub fn thought(content: impl Into<String>) -> Self {
        Message {
            role: Role::Thought,
            content: content.into(),
        }
    }

    /// Whether this entry is internal (hidden from the user-facing
    /// transcript but kept in model context).
    pub fn is_thought(&self) -> bool {
        self.role == Role::Thought || self.content.starts_with(THOUGHT_PREFIX)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_roles() {
        assert_eq!(Message::system("s").role, Role::System);
        assert_eq!(Message::user("u").role, Role::User);
        assert_eq!(Message::assistant("a").role, Role::Assistant);
        assert_eq!(Message::thought("Thought: - t").role, Role::Thought);
    }

    #[test]
    fn test_is_thought_by_role() {
        assert!(Message::thought("Thought: - I called clock.").is_thought());
        assert!(!Message::assistant("All done.").is_thought());
    }

    #[test]
    fn test_is_thought_by_prefix() {
        // An assistant message carrying the marker is still internal.
        let msg = Message::assistant("Thought: leaked marker");
        assert!(msg.is_thought());
    }

    #[test]
    fn test_role_serialization() {
        let msg = Message::user("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");

        let thought = Message::thought("Thought: - did a thing.");
        let json = serde_json::to_value(&thought).unwrap();
        assert_eq!(json["role"], "thought");
    }

    #[test]
    fn test_round_trip() {
        let msgs = vec![
            Message::system("You are Daybot."),
            Message::user("hi"),
            Message::thought("Thought: - I called echo with args {} and got back: hi."),
            Message::assistant("hi!"),
        ];
        let encoded = serde_json::to_string(&msgs).unwrap();
        let decoded: Vec<Message> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(msgs, decoded);
    }
}
