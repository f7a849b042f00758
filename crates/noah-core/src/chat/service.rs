//! Chat orchestration: one call per incoming user message.
//!
//! `ChatService` is generic over the store so tests can run against an
//! in-memory double while the server uses SQLite. It keeps no state between
//! messages.

use noah_types::chat::{ChatReply, ConversationId, Sender, StoredTurn, validate_utterance};
use noah_types::config::ChatConfig;
use noah_types::error::ChatError;
use tracing::{info, instrument};

use super::generator::ReplyGenerator;
use super::history::HistoryAssembler;
use super::session::ResolvedSession;
use super::store::ConversationStore;

/// Sequences persist, assemble, generate, persist for each message.
pub struct ChatService<S: ConversationStore> {
    store: S,
    assembler: HistoryAssembler,
    generator: ReplyGenerator,
    max_message_chars: usize,
}

impl<S: ConversationStore> ChatService<S> {
    pub fn new(store: S, generator: ReplyGenerator, config: &ChatConfig) -> Self {
        Self {
            store,
            assembler: HistoryAssembler::new(config.history_limit, config.history_window),
            generator,
            max_message_chars: config.max_message_chars,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn generator(&self) -> &ReplyGenerator {
        &self.generator
    }

    /// Handle one user message and return the reply with its session id.
    ///
    /// Validation failures write nothing. Once the user turn is appended it
    /// stays persisted even if a later step fails. Generation failures do not
    /// surface here: the fallback reply is stored and returned like any other.
    #[instrument(skip_all, fields(conversation_id))]
    pub async fn handle_message(
        &self,
        session_id: Option<&str>,
        message: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        let utterance = validate_utterance(message, self.max_message_chars)?;

        let session = ResolvedSession::resolve(session_id);
        let is_new = session.is_new();
        let conversation_id = session.into_id();
        tracing::Span::current().record("conversation_id", conversation_id.as_str());

        self.store
            .append(&conversation_id, Sender::User, &utterance)
            .await?;

        let context = self
            .assembler
            .assemble(&self.store, &conversation_id, &utterance)
            .await?;

        let reply = self.generator.generate(&context).await;

        self.store
            .append(&conversation_id, Sender::Ai, &reply)
            .await?;

        info!(
            new_conversation = is_new,
            history_turns = context.history.len(),
            "Chat exchange completed"
        );

        Ok(ChatReply {
            reply,
            conversation_id,
        })
    }

    /// Full transcript for a session, oldest first.
    ///
    /// Unknown ids yield an empty transcript.
    pub async fn history(&self, session_id: Option<&str>) -> Result<Vec<StoredTurn>, ChatError> {
        let conversation_id = session_id
            .and_then(ConversationId::parse)
            .ok_or(ChatError::MissingSessionId)?;
        Ok(self.store.read_all(&conversation_id).await?)
    }
}
