//! Messages and conversation summaries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a message within a conversation.
///
/// Fixture messages use their position; sent messages use the send time
/// in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Derives an id from a timestamp.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(u64::try_from(at.timestamp_millis()).unwrap_or_default())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub u64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The signed-in user.
    You,
    /// The other side of the conversation.
    Peer(String),
}

impl Sender {
    /// Creates a peer sender.
    #[must_use]
    pub fn peer(name: impl Into<String>) -> Self {
        Self::Peer(name.into())
    }

    /// True when the signed-in user wrote the message.
    #[must_use]
    pub const fn is_you(&self) -> bool {
        matches!(self, Self::You)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::You => write!(f, "You"),
            Self::Peer(name) => write!(f, "{name}"),
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a message from the signed-in user, stamped `at`.
    #[must_use]
    pub fn outgoing(content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::from_timestamp(at),
            sender: Sender::You,
            content: content.into(),
            timestamp: at,
        }
    }

    /// The last `n` whitespace-separated words of the content.
    #[must_use]
    pub fn trailing_words(&self, n: usize) -> String {
        let words: Vec<&str> = self.content.split_whitespace().collect();
        let start = words.len().saturating_sub(n);
        words[start..].join(" ")
    }
}

/// A row in the conversation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub name: String,
    pub last_message: String,
    pub unread_count: u32,
}

impl ConversationSummary {
    /// Creates a summary row.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, last_message: impl Into<String>, unread_count: u32) -> Self {
        Self {
            id: ConversationId(id),
            name: name.into(),
            last_message: last_message.into(),
            unread_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outgoing_message_id_is_timestamp() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let message = Message::outgoing("hi", at);
        assert_eq!(message.id, MessageId(1_700_000_000_123));
        assert!(message.sender.is_you());
    }

    #[test]
    fn test_trailing_words() {
        let message = Message::outgoing("Any plans for the weekend?", Utc::now());
        assert_eq!(message.trailing_words(3), "for the weekend?");
        assert_eq!(message.trailing_words(10), "Any plans for the weekend?");
    }

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::You.to_string(), "You");
        assert_eq!(Sender::peer("Sarah").to_string(), "Sarah");
    }
}
