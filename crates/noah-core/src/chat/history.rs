//! History assembly for the generation call.
//!
//! Reads a bounded window of stored turns and pairs it with the new user
//! utterance. The assembler never writes; the orchestrator persists the user
//! turn before assembly runs.

use noah_types::chat::{ConversationId, HistoryWindow, Sender, Turn};
use noah_types::error::RepositoryError;
use tracing::debug;

use super::store::ConversationStore;

/// Ordered context handed to the reply generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledContext {
    /// Prior turns, oldest first.
    pub history: Vec<Turn>,
    /// The new user utterance, answered as the final turn.
    pub utterance: String,
}

impl AssembledContext {
    /// Prior turns followed by the utterance as a user turn.
    pub fn turns(&self) -> Vec<Turn> {
        let mut turns = self.history.clone();
        turns.push(Turn::user(self.utterance.clone()));
        turns
    }
}

/// Builds the context window for a conversation.
#[derive(Debug, Clone)]
pub struct HistoryAssembler {
    limit: u32,
    window: HistoryWindow,
}

impl HistoryAssembler {
    pub fn new(limit: u32, window: HistoryWindow) -> Self {
        Self { limit, window }
    }

    /// Read up to `limit` stored turns and append `utterance`.
    ///
    /// The orchestrator persists the user turn first, so when the window
    /// reaches the end of the conversation its last turn is that copy of
    /// `utterance`. It is dropped so the utterance appears exactly once, last.
    /// A window that stops short of the end is left intact.
    pub async fn assemble<S: ConversationStore>(
        &self,
        store: &S,
        conversation_id: &ConversationId,
        utterance: &str,
    ) -> Result<AssembledContext, RepositoryError> {
        let (mut history, reaches_end) = match self.window {
            HistoryWindow::Oldest => {
                // One extra row tells whether the conversation goes on past the window.
                let mut turns = store
                    .read_recent(conversation_id, self.limit.saturating_add(1))
                    .await?;
                let reaches_end = turns.len() <= self.limit as usize;
                turns.truncate(self.limit as usize);
                (turns, reaches_end)
            }
            HistoryWindow::Newest => (store.read_latest(conversation_id, self.limit).await?, true),
        };

        if reaches_end
            && history
                .last()
                .is_some_and(|turn| turn.sender == Sender::User && turn.text == utterance)
        {
            history.pop();
        }

        debug!(
            conversation_id = %conversation_id,
            prior_turns = history.len(),
            window = ?self.window,
            "Assembled conversation history"
        );

        Ok(AssembledContext {
            history,
            utterance: utterance.to_string(),
        })
    }
}
