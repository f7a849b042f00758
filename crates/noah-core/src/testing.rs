//! In-memory test doubles shared by the unit tests in this crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use noah_types::chat::{ConversationId, Sender, StoredTurn, Turn};
use noah_types::error::RepositoryError;
use noah_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

use crate::chat::store::ConversationStore;
use crate::llm::provider::LlmProvider;

/// Conversation store backed by a `HashMap`.
///
/// Optionally accepts only a fixed number of writes; every append after that
/// fails with `RepositoryError::Connection`.
#[derive(Default)]
pub struct InMemoryStore {
    logs: Mutex<HashMap<String, Vec<StoredTurn>>>,
    write_budget: Option<usize>,
    writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn failing() -> Self {
        Self::failing_after(0)
    }

    /// Accept `writes` appends, then fail.
    pub fn failing_after(writes: usize) -> Self {
        Self {
            write_budget: Some(writes),
            ..Self::default()
        }
    }

    pub fn turns(&self, id: &ConversationId) -> Vec<Turn> {
        self.logs
            .lock()
            .unwrap()
            .get(id.as_str())
            .map(|log| log.iter().cloned().map(Turn::from).collect())
            .unwrap_or_default()
    }

    pub fn conversation_count(&self) -> usize {
        self.logs.lock().unwrap().len()
    }
}

impl ConversationStore for InMemoryStore {
    async fn append(
        &self,
        conversation_id: &ConversationId,
        sender: Sender,
        text: &str,
    ) -> Result<(), RepositoryError> {
        let attempt = self.writes.fetch_add(1, Ordering::SeqCst);
        if self.write_budget.is_some_and(|budget| attempt >= budget) {
            return Err(RepositoryError::Connection);
        }
        self.logs
            .lock()
            .unwrap()
            .entry(conversation_id.as_str().to_string())
            .or_default()
            .push(StoredTurn {
                sender,
                text: text.to_string(),
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn read_recent(
        &self,
        conversation_id: &ConversationId,
        limit: u32,
    ) -> Result<Vec<Turn>, RepositoryError> {
        let turns = self.turns(conversation_id);
        Ok(turns.into_iter().take(limit as usize).collect())
    }

    async fn read_latest(
        &self,
        conversation_id: &ConversationId,
        limit: u32,
    ) -> Result<Vec<Turn>, RepositoryError> {
        let turns = self.turns(conversation_id);
        let skip = turns.len().saturating_sub(limit as usize);
        Ok(turns.into_iter().skip(skip).collect())
    }

    async fn read_all(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<StoredTurn>, RepositoryError> {
        Ok(self
            .logs
            .lock()
            .unwrap()
            .get(conversation_id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn conversation_exists(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.logs.lock().unwrap().contains_key(conversation_id.as_str()))
    }
}

/// LLM provider that returns a fixed reply (or error) and records requests.
pub struct ScriptedProvider {
    reply: Result<String, String>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Arc::default(),
        }
    }

    /// Shared handle to the requests this provider has received.
    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(CompletionResponse {
                content: text.clone(),
                model: request.model.clone(),
                finish_reason: Some("STOP".to_string()),
                usage: Usage {
                    input_tokens: 12,
                    output_tokens: 7,
                },
            }),
            Err(message) => Err(LlmError::Provider {
                message: message.clone(),
            }),
        }
    }
}
