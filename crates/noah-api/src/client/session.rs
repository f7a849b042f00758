//! Client-side session state: cached token plus the local transcript.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use noah_types::chat::{Sender, StoredTurn};
use tracing::{debug, warn};

use super::ClientError;
use super::api::ChatClient;
use super::session_cache::SessionCache;

/// Shown locally when a send fails for any reason.
pub const SEND_FAILURE_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// One line of the local transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl TranscriptEntry {
    fn now(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

impl From<StoredTurn> for TranscriptEntry {
    fn from(turn: StoredTurn) -> Self {
        Self {
            sender: turn.sender,
            text: turn.text,
            at: turn.created_at,
        }
    }
}

/// Clears the in-flight flag when a send finishes, however it finishes.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Keeps the cached token and transcript in step with the server.
///
/// At most one send is in flight; a second concurrent send is rejected
/// with [`ClientError::Busy`].
pub struct ClientSession {
    client: ChatClient,
    cache: SessionCache,
    session_id: Mutex<Option<String>>,
    transcript: Mutex<Vec<TranscriptEntry>>,
    in_flight: AtomicBool,
}

impl ClientSession {
    pub fn new(client: ChatClient, cache: SessionCache) -> Self {
        Self {
            client,
            cache,
            session_id: Mutex::new(None),
            transcript: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn session_id(&self) -> Option<String> {
        lock(&self.session_id).clone()
    }

    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        lock(&self.transcript).clone()
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Restore the cached token and, if there is one, fetch its history.
    ///
    /// Returns the number of turns loaded. A failed fetch is logged and
    /// leaves the transcript empty.
    pub async fn load(&self) -> usize {
        let Some(token) = self.cache.load().await else {
            return 0;
        };
        *lock(&self.session_id) = Some(token.clone());

        match self.client.history(&token).await {
            Ok(history) => {
                let entries: Vec<TranscriptEntry> =
                    history.messages.into_iter().map(TranscriptEntry::from).collect();
                let count = entries.len();
                *lock(&self.transcript) = entries;
                debug!(session_id = %token, turns = count, "Loaded conversation history");
                count
            }
            Err(err) => {
                warn!(session_id = %token, error = %err, "Failed to load conversation history");
                0
            }
        }
    }

    /// Send one message.
    ///
    /// Blank input is ignored (`Ok(None)`). Otherwise the user entry is added
    /// immediately and the returned entry is the reply, or
    /// [`SEND_FAILURE_REPLY`] if the request failed.
    pub async fn send(&self, text: &str) -> Result<Option<TranscriptEntry>, ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ClientError::Busy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.push(TranscriptEntry::now(Sender::User, text));

        let token = self.session_id();
        let reply = match self.client.send_message(text, token.as_deref()).await {
            Ok(response) => {
                if token.as_deref() != Some(response.session_id.as_str()) {
                    self.adopt(&response.session_id).await;
                }
                TranscriptEntry::now(Sender::Ai, response.reply)
            }
            Err(err) => {
                warn!(error = %err, "Failed to send message");
                TranscriptEntry::now(Sender::Ai, SEND_FAILURE_REPLY)
            }
        };

        self.push(reply.clone());
        Ok(Some(reply))
    }

    /// Forget the current session; the next send starts a new conversation.
    pub async fn reset(&self) -> Result<(), ClientError> {
        self.cache.clear().await?;
        *lock(&self.session_id) = None;
        lock(&self.transcript).clear();
        Ok(())
    }

    async fn adopt(&self, token: &str) {
        *lock(&self.session_id) = Some(token.to_string());
        if let Err(err) = self.cache.store(token).await {
            warn!(path = %self.cache.path().display(), error = %err, "Failed to cache session id");
        }
    }

    fn push(&self, entry: TranscriptEntry) {
        lock(&self.transcript).push(entry);
    }
}

/// Lock, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
