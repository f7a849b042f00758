//! Conversation, turn, and message-validation types for Noah.
//!
//! A conversation is an opaque session token shared between the client and
//! the server. Each conversation owns an append-only log of turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::error::ChatError;

/// Default cap on the length of a user-authored turn, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Who authored a turn.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'ai'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    #[serde(alias = "assistant")]
    Ai,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Ai => write!(f, "ai"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "ai" | "assistant" => Ok(Sender::Ai),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// Opaque conversation (session) identifier.
///
/// Any non-blank string supplied by a client is accepted as-is; the server
/// mints UUIDv7 strings for new conversations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Mint a fresh, time-sortable conversation id.
    pub fn mint() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Accept a client-supplied token. Blank tokens are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One role-tagged message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub sender: Sender,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            text: text.into(),
        }
    }
}

/// A persisted turn, including the time the store committed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTurn {
    pub sender: Sender,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoredTurn> for Turn {
    fn from(stored: StoredTurn) -> Self {
        Turn {
            sender: stored.sender,
            text: stored.text,
        }
    }
}

/// The outcome of one orchestrated exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    pub conversation_id: ConversationId,
}

/// Which end of a conversation the history window is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryWindow {
    /// The first N turns of the conversation.
    #[default]
    Oldest,
    /// The last N turns of the conversation.
    Newest,
}

/// Validate a user utterance and return its trimmed form.
///
/// Blank or missing input is rejected, as is input longer than `max_chars`
/// characters (Unicode scalar values, measured after trimming).
pub fn validate_utterance(raw: Option<&str>, max_chars: usize) -> Result<String, ChatError> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(ChatError::EmptyMessage);
    }
    let len = text.chars().count();
    if len > max_chars {
        return Err(ChatError::MessageTooLong {
            len,
            max: max_chars,
        });
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Ai] {
            let s = sender.to_string();
            let parsed: Sender = s.parse().unwrap();
            assert_eq!(sender, parsed);
        }
    }

    #[test]
    fn test_sender_accepts_assistant_alias() {
        assert_eq!("assistant".parse::<Sender>().unwrap(), Sender::Ai);
        let parsed: Sender = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(parsed, Sender::Ai);
        assert!("model".parse::<Sender>().is_err());
    }

    #[test]
    fn test_sender_serde() {
        let json = serde_json::to_string(&Sender::Ai).unwrap();
        assert_eq!(json, "\"ai\"");
    }

    #[test]
    fn test_minted_ids_do_not_collide() {
        let a = ConversationId::mint();
        let b = ConversationId::mint();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_parse_rejects_blank_ids() {
        assert!(ConversationId::parse("").is_none());
        assert!(ConversationId::parse("   ").is_none());
        assert_eq!(ConversationId::parse(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_validate_utterance() {
        assert!(matches!(
            validate_utterance(None, MAX_MESSAGE_CHARS),
            Err(ChatError::EmptyMessage)
        ));
        assert!(matches!(
            validate_utterance(Some("  \n "), MAX_MESSAGE_CHARS),
            Err(ChatError::EmptyMessage)
        ));
        assert_eq!(
            validate_utterance(Some("  where is my order? "), MAX_MESSAGE_CHARS).unwrap(),
            "where is my order?"
        );
    }

    #[test]
    fn test_validate_utterance_length_boundary() {
        let exact = "a".repeat(MAX_MESSAGE_CHARS);
        assert!(validate_utterance(Some(&exact), MAX_MESSAGE_CHARS).is_ok());

        let over = "a".repeat(MAX_MESSAGE_CHARS + 1);
        match validate_utterance(Some(&over), MAX_MESSAGE_CHARS) {
            Err(ChatError::MessageTooLong { len, max }) => {
                assert_eq!(len, 1001);
                assert_eq!(max, 1000);
            }
            other => panic!("expected MessageTooLong, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_utterance_counts_chars_not_bytes() {
        let accented = "é".repeat(MAX_MESSAGE_CHARS);
        assert!(validate_utterance(Some(&accented), MAX_MESSAGE_CHARS).is_ok());
    }

    #[test]
    fn test_validate_utterance_measures_trimmed_text() {
        let padded = format!("  {}  ", "a".repeat(MAX_MESSAGE_CHARS));
        let text = validate_utterance(Some(&padded), MAX_MESSAGE_CHARS).unwrap();
        assert_eq!(text.chars().count(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn test_stored_turn_serializes_camel_case() {
        let turn = StoredTurn {
            sender: Sender::User,
            text: "hi".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"sender\":\"user\""));
    }

    #[test]
    fn test_history_window_default() {
        assert_eq!(HistoryWindow::default(), HistoryWindow::Oldest);
    }
}
