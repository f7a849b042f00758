//! SQLite conversation store.
//!
//! Implements `ConversationStore` from `noah-core` with raw sqlx queries,
//! private Row structs, and the split reader/writer pool. Turn order is the
//! autoincrement row id, never the timestamp.

use chrono::{DateTime, Utc};
use noah_core::chat::store::ConversationStore;
use noah_types::chat::{ConversationId, Sender, StoredTurn, Turn};
use noah_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationStore`.
#[derive(Clone)]
pub struct SqliteConversationStore {
    pool: DatabasePool,
}

impl SqliteConversationStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

struct MessageRow {
    sender: String,
    text: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            sender: row.try_get("sender")?,
            text: row.try_get("text")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn sender(&self) -> Result<Sender, RepositoryError> {
        self.sender
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))
    }

    fn into_turn(self) -> Result<Turn, RepositoryError> {
        Ok(Turn {
            sender: self.sender()?,
            text: self.text,
        })
    }

    fn into_stored(self) -> Result<StoredTurn, RepositoryError> {
        Ok(StoredTurn {
            sender: self.sender()?,
            created_at: parse_datetime(&self.created_at)?,
            text: self.text,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn map_rows<T>(
    rows: &[sqlx::sqlite::SqliteRow],
    convert: impl Fn(MessageRow) -> Result<T, RepositoryError>,
) -> Result<Vec<T>, RepositoryError> {
    rows.iter()
        .map(|row| {
            MessageRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))
                .and_then(&convert)
        })
        .collect()
}

impl ConversationStore for SqliteConversationStore {
    async fn append(
        &self,
        conversation_id: &ConversationId,
        sender: Sender,
        text: &str,
    ) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query("INSERT OR IGNORE INTO conversations (id, created_at) VALUES (?, ?)")
            .bind(conversation_id.as_str())
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "INSERT INTO messages (conversation_id, sender, text, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(conversation_id.as_str())
        .bind(sender.to_string())
        .bind(text)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn read_recent(
        &self,
        conversation_id: &ConversationId,
        limit: u32,
    ) -> Result<Vec<Turn>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT sender, text, created_at FROM messages WHERE conversation_id = ? ORDER BY id ASC LIMIT ?",
        )
        .bind(conversation_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        map_rows(&rows, MessageRow::into_turn)
    }

    async fn read_latest(
        &self,
        conversation_id: &ConversationId,
        limit: u32,
    ) -> Result<Vec<Turn>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT sender, text, created_at FROM (
                   SELECT id, sender, text, created_at FROM messages
                   WHERE conversation_id = ? ORDER BY id DESC LIMIT ?
               ) ORDER BY id ASC"#,
        )
        .bind(conversation_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        map_rows(&rows, MessageRow::into_turn)
    }

    async fn read_all(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<StoredTurn>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT sender, text, created_at FROM messages WHERE conversation_id = ? ORDER BY id ASC",
        )
        .bind(conversation_id.as_str())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        map_rows(&rows, MessageRow::into_stored)
    }

    async fn conversation_exists(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM conversations WHERE id = ?")
            .bind(conversation_id.as_str())
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> (tempfile::TempDir, SqliteConversationStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteConversationStore::new(pool))
    }

    async fn seed(store: &SqliteConversationStore, id: &ConversationId, turns: usize) {
        for i in 0..turns {
            let sender = if i % 2 == 0 { Sender::User } else { Sender::Ai };
            store.append(id, sender, &format!("turn {i}")).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_append_creates_conversation_once() {
        let (_dir, store) = test_store().await;
        let id = ConversationId::mint();

        assert!(!store.conversation_exists(&id).await.unwrap());
        seed(&store, &id, 3).await;
        assert!(store.conversation_exists(&id).await.unwrap());

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conversations")
            .fetch_one(&store.pool().reader)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_read_recent_is_oldest_first_and_bounded() {
        let (_dir, store) = test_store().await;
        let id = ConversationId::mint();
        seed(&store, &id, 14).await;

        let turns = store.read_recent(&id, 10).await.unwrap();
        assert_eq!(turns.len(), 10);
        assert_eq!(turns[0], Turn::user("turn 0"));
        assert_eq!(turns[9], Turn::ai("turn 9"));
    }

    #[tokio::test]
    async fn test_read_latest_keeps_tail_in_order() {
        let (_dir, store) = test_store().await;
        let id = ConversationId::mint();
        seed(&store, &id, 14).await;

        let turns = store.read_latest(&id, 10).await.unwrap();
        assert_eq!(turns.len(), 10);
        assert_eq!(turns[0], Turn::user("turn 4"));
        assert_eq!(turns[9], Turn::ai("turn 13"));
    }

    #[tokio::test]
    async fn test_unknown_conversation_reads_empty() {
        let (_dir, store) = test_store().await;
        let id = ConversationId::parse("never-issued").unwrap();

        assert!(store.read_recent(&id, 10).await.unwrap().is_empty());
        assert!(store.read_latest(&id, 10).await.unwrap().is_empty());
        assert!(store.read_all(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_all_carries_timestamps() {
        let (_dir, store) = test_store().await;
        let id = ConversationId::mint();
        let before = Utc::now();
        store.append(&id, Sender::User, "Where is my order?").await.unwrap();
        store.append(&id, Sender::Ai, "Let me check.").await.unwrap();

        let turns = store.read_all(&id).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].sender, Sender::User);
        assert_eq!(turns[1].text, "Let me check.");
        assert!(turns[0].created_at >= before - chrono::Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_conversations_are_isolated() {
        let (_dir, store) = test_store().await;
        let a = ConversationId::mint();
        let b = ConversationId::mint();
        store.append(&a, Sender::User, "from a").await.unwrap();
        store.append(&b, Sender::User, "from b").await.unwrap();

        assert_eq!(store.read_recent(&a, 10).await.unwrap(), vec![Turn::user("from a")]);
        assert_eq!(store.read_recent(&b, 10).await.unwrap(), vec![Turn::user("from b")]);
    }

    #[tokio::test]
    async fn test_concurrent_appends_all_land() {
        let (_dir, store) = test_store().await;
        let id = ConversationId::mint();

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                store.append(&id, Sender::User, &format!("msg {i}")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.read_all(&id).await.unwrap().len(), 8);
    }
}
