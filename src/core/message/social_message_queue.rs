use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Refusing to queue an empty message")]
    Empty,
}

/// A single pending line for the next countdown post.
///
/// `take` hands the message to exactly one caller: the stored value is gone
/// by the time it returns, whether or not the caller goes on to use it.
#[async_trait]
pub trait SocialMessageQueue: Send + Sync {
    async fn take(&self) -> Result<Option<String>, QueueError>;

    /// Replace whatever is pending with `message`.
    async fn push(&self, message: &str) -> Result<(), QueueError>;
}
