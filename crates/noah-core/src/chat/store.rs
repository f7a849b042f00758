//! ConversationStore trait definition.
//!
//! A durable mapping from conversation id to an append-only, ordered log of
//! turns. Follows the RPITIT repository pattern used across the workspace.

use noah_types::chat::{ConversationId, Sender, StoredTurn, Turn};
use noah_types::error::RepositoryError;

/// Repository trait for conversation persistence.
///
/// Implementations live in noah-infra (e.g., `SqliteConversationStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ConversationStore: Send + Sync {
    /// Append one immutable turn, creating the conversation if it is absent.
    ///
    /// Creating an existing conversation is a no-op, so repeated appends to
    /// the same id always extend the same log.
    fn append(
        &self,
        conversation_id: &ConversationId,
        sender: Sender,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Read at most `limit` turns counted from the start of the conversation,
    /// oldest first.
    ///
    /// Unknown ids yield an empty list, not an error.
    fn read_recent(
        &self,
        conversation_id: &ConversationId,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, RepositoryError>> + Send;

    /// Read the last `limit` turns of the conversation, oldest first.
    fn read_latest(
        &self,
        conversation_id: &ConversationId,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, RepositoryError>> + Send;

    /// Read the full log with commit timestamps, oldest first.
    fn read_all(
        &self,
        conversation_id: &ConversationId,
    ) -> impl std::future::Future<Output = Result<Vec<StoredTurn>, RepositoryError>> + Send;

    /// Whether a conversation record exists for this id.
    fn conversation_exists(
        &self,
        conversation_id: &ConversationId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
