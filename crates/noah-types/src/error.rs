use thiserror::Error;

/// Errors from repository operations (used by trait definitions in noah-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors raised while handling a chat exchange or a history read.
///
/// Display strings are user-facing: the HTTP layer returns them verbatim
/// for client errors.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Please enter a message.")]
    EmptyMessage,

    #[error("Message too long")]
    MessageTooLong { len: usize, max: usize },

    #[error("Session ID is required")]
    MissingSessionId,

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl ChatError {
    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ChatError::EmptyMessage | ChatError::MessageTooLong { .. } | ChatError::MissingSessionId
        )
    }
}

/// Errors from resolving configuration the server cannot start without.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing credential: environment variable {0} is not set")]
    MissingCredential(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_chat_error_messages_are_user_facing() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "Please enter a message.");
        assert_eq!(
            ChatError::MessageTooLong { len: 1200, max: 1000 }.to_string(),
            "Message too long"
        );
    }

    #[test]
    fn test_chat_error_classification() {
        assert!(ChatError::EmptyMessage.is_client_error());
        assert!(ChatError::MissingSessionId.is_client_error());
        assert!(!ChatError::Storage(RepositoryError::Connection).is_client_error());
    }

    #[test]
    fn test_storage_error_from_repository() {
        let err: ChatError = RepositoryError::Connection.into();
        assert!(matches!(err, ChatError::Storage(RepositoryError::Connection)));
    }
}
