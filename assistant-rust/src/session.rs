use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        })
    }
}

/// One message exchanged in a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// Ordered chat log for one session. Append-only: turns are kept in call
/// order and never reordered or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Consumes the history and returns it with one more turn at the end.
    #[must_use]
    pub fn with_turn(mut self, role: ChatRole, text: impl Into<String>) -> Self {
        self.turns.push(ChatTurn {
            role,
            text: text.into(),
        });
        self
    }

    /// The last `max_turns` turns (all of them when `None`) rendered as
    /// `Role: text` lines.
    #[must_use]
    pub fn transcript(&self, max_turns: Option<usize>) -> String {
        let skip = max_turns.map_or(0, |max| self.turns.len().saturating_sub(max));
        self.turns
            .iter()
            .skip(skip)
            .map(|turn| format!("{}: {}", turn.role, turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Returns a new history equal to `history` with the turn appended.
#[must_use]
pub fn append_turn(history: &ChatHistory, role: ChatRole, text: impl Into<String>) -> ChatHistory {
    history.clone().with_turn(role, text)
}
