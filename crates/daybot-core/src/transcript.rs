//! The conversation transcript — an append-only, ordered message log.
//!
//! Two consumers read it: the agent loop, which sends the full log to the
//! model, and the rendering surface, which shows only the user-visible
//! subset. Entries are never removed or reordered; insertion order is the
//! conversation order.

use crate::types::{Message, Role};

/// Append-only conversation log.
///
/// The loop borrows the transcript mutably for the duration of one turn, so
/// exclusive write access during a turn is enforced by the borrow checker
/// rather than a lock.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Transcript {
            messages: Vec::new(),
        }
    }

    /// Append a message to the end of the log.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The full ordered log, thoughts included (model context).
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// Lazy view of the user-facing history: system, user, and assistant
    /// entries whose content does not carry the `Thought:` marker.
    pub fn visible_to_user(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| {
            matches!(m.role, Role::System | Role::User | Role::Assistant) && !m.is_thought()
        })
    }

    /// Number of entries in the full log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transcript {
        let mut t = Transcript::new();
        t.append(Message::system("You are Daybot."));
        t.append(Message::user("add milk to my tasks"));
        t.append(Message::thought(
            "Thought: - I called add_task with args {\"title\":\"milk\"} and got back: ok.",
        ));
        t.append(Message::assistant("Added \"milk\" to your tasks."));
        t
    }

    #[test]
    fn test_append_preserves_order() {
        let t = sample();
        let roles: Vec<Role> = t.all().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Thought, Role::Assistant]
        );
    }

    #[test]
    fn test_all_includes_thoughts() {
        let t = sample();
        assert_eq!(t.all().len(), 4);
        assert!(t.all().iter().any(|m| m.is_thought()));
    }

    #[test]
    fn test_visible_to_user_hides_thoughts() {
        let t = sample();
        let visible: Vec<&Message> = t.visible_to_user().collect();
        assert_eq!(visible.len(), 3);
        assert!(visible.iter().all(|m| !m.is_thought()));
    }

    #[test]
    fn test_visible_to_user_hides_prefixed_assistant() {
        let mut t = sample();
        // A Thought: marker on an assistant entry still hides it.
        t.append(Message::assistant("Thought: internal note"));
        assert!(t
            .visible_to_user()
            .all(|m| !m.content.starts_with("Thought:")));
        assert_eq!(t.all().len(), 5);
    }

    #[test]
    fn test_len_and_empty() {
        let mut t = Transcript::new();
        assert!(t.is_empty());
        t.append(Message::user("hi"));
        assert_eq!(t.len(), 1);
        assert!(!t.is_empty());
    }
}
