use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::retry::RetryPolicy;

/// Kind of media attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    None,
}

/// The daily top post, ready to be shown in a countdown message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopPost {
    pub title: String,
    pub permalink_url: String,
    pub score: i64,
    pub comment_count: u64,
    pub media_url: Option<String>,
    pub media_kind: MediaKind,
}

/// A listing entry as the API returned it, before filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPost {
    pub title: Option<String>,
    /// Path relative to reddit.com, e.g. `/r/arcraiders/comments/abc/...`.
    pub permalink: String,
    pub score: i64,
    pub num_comments: u64,
    pub over_18: bool,
    pub spoiler: bool,
    /// Source URL of the first preview image, still HTML-escaped.
    pub preview_image_url: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[redacted]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AccessToken {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub subreddit: String,
    pub min_title_length: usize,
    pub retry: RetryPolicy,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            subreddit: "arcraiders".to_string(),
            min_title_length: 10,
            retry: RetryPolicy::exponential(3),
        }
    }
}

/// Snapshot of the provider's caches, for logging and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentStatus {
    pub configured: bool,
    pub has_token: bool,
    pub token_expired: bool,
    pub has_cached_post: bool,
    pub cache_day: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_reddit_secrets() {
        let credentials = RedditCredentials {
            client_id: "client-id".to_string(),
            client_secret: "client-secret-value".to_string(),
            username: "raider".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{credentials:?}");
        assert!(printed.contains("client-id") && printed.contains("raider"));
        assert!(!printed.contains("client-secret-value"));
        assert!(!printed.contains("hunter2"));

        let token = AccessToken {
            token: "bearer-value".to_string(),
            expires_at: Utc::now(),
        };
        assert!(!format!("{token:?}").contains("bearer-value"));
    }
}
