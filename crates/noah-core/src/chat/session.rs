//! Conversation id resolution for incoming messages.

use noah_types::chat::ConversationId;

/// Outcome of resolving the session token attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSession {
    /// The client supplied a usable token.
    Supplied(ConversationId),
    /// No usable token; a new one was minted.
    Minted(ConversationId),
}

impl ResolvedSession {
    /// Use the client's token when present and non-blank, otherwise mint one.
    ///
    /// The server does not check that a supplied token was previously
    /// issued: an unknown token simply starts a conversation under that id.
    pub fn resolve(supplied: Option<&str>) -> Self {
        match supplied.and_then(ConversationId::parse) {
            Some(id) => ResolvedSession::Supplied(id),
            None => ResolvedSession::Minted(ConversationId::mint()),
        }
    }

    pub fn id(&self) -> &ConversationId {
        match self {
            ResolvedSession::Supplied(id) | ResolvedSession::Minted(id) => id,
        }
    }

    pub fn into_id(self) -> ConversationId {
        match self {
            ResolvedSession::Supplied(id) | ResolvedSession::Minted(id) => id,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, ResolvedSession::Minted(_))
    }
}
