use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::message::{QueueError, SocialMessageQueue};

/// One-shot social message kept in a plain text file (`next-message.txt`).
///
/// `take` claims the file by renaming it before reading, so two callers can
/// never both see the same message.
pub struct FileSocialMessageQueue {
    path: PathBuf,
}

impl FileSocialMessageQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn claimed_path(&self) -> PathBuf {
        self.path.with_extension("claimed")
    }
}

#[async_trait]
impl SocialMessageQueue for FileSocialMessageQueue {
    async fn take(&self) -> Result<Option<String>, QueueError> {
        let claimed = self.claimed_path();
        match fs::rename(&self.path, &claimed) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let text = fs::read_to_string(&claimed);
        if let Err(e) = fs::remove_file(&claimed) {
            tracing::warn!(path = %claimed.display(), error = %e, "Failed to delete claimed social message");
        }

        let text = text?;
        let message = text.trim();
        if message.is_empty() {
            return Ok(None);
        }
        Ok(Some(message.to_string()))
    }

    async fn push(&self, message: &str) -> Result<(), QueueError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(QueueError::Empty);
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, message)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "Social message queued");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn take_returns_the_message_once() {
        let dir = TempDir::new().unwrap();
        let queue = FileSocialMessageQueue::new(dir.path().join("next-message.txt"));

        queue.push("  Only one more week!\n").await.unwrap();
        assert_eq!(queue.take().await.unwrap().as_deref(), Some("Only one more week!"));
        assert_eq!(queue.take().await.unwrap(), None);
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn push_replaces_the_pending_message() {
        let dir = TempDir::new().unwrap();
        let queue = FileSocialMessageQueue::new(dir.path().join("next-message.txt"));

        queue.push("first").await.unwrap();
        queue.push("second").await.unwrap();
        assert_eq!(queue.take().await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn blank_messages_are_refused_or_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("next-message.txt");
        let queue = FileSocialMessageQueue::new(&path);

        assert!(matches!(queue.push("   ").await, Err(QueueError::Empty)));

        fs::write(&path, "\n\n").unwrap();
        assert_eq!(queue.take().await.unwrap(), None);
        assert!(!path.exists());
    }
}
