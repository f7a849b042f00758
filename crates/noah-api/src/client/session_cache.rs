//! On-disk cache for the current session token.

use std::path::{Path, PathBuf};

/// File name of the cached token inside the client directory.
pub const SESSION_FILE: &str = "chat_session_id";

/// Reads and writes `{dir}/chat_session_id`.
///
/// The token is only a hint: the server decides which conversation a
/// message lands in.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached token. Missing, unreadable or blank files yield `None`.
    pub async fn load(&self) -> Option<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!("Failed to read {}: {err}", self.path.display());
                None
            }
        }
    }

    pub async fn store(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token).await
    }

    /// Forget the cached token. A missing file is not an error.
    pub async fn clear(&self) -> std::io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path());
        assert_eq!(cache.load().await, None);
    }

    #[tokio::test]
    async fn test_store_then_load_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(&dir.path().join("nested"));

        cache.store("abc-123").await.unwrap();
        assert_eq!(cache.load().await.as_deref(), Some("abc-123"));

        cache.clear().await.unwrap();
        assert_eq!(cache.load().await, None);
        cache.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_file_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path());
        tokio::fs::write(cache.path(), "  \n").await.unwrap();
        assert_eq!(cache.load().await, None);
    }
}
