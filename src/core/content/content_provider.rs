use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use super::content_models::{
    AccessToken, ContentSettings, ContentStatus, MediaKind, RawPost, RedditCredentials, TopPost,
};
use crate::core::retry;

/// Tokens live for an hour upstream; refresh well before that.
const TOKEN_TTL_MINUTES: i64 = 45;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("token exchange rejected: {0}")]
    TokenRejected(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl ContentError {
    /// Connection resets, timeouts, DNS failures and 5xx responses are worth
    /// another try. Anything else will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            ContentError::Timeout | ContentError::Connect(_) => true,
            ContentError::Status(status) => *status >= 500,
            _ => false,
        }
    }
}

/// The two upstream calls the provider needs.
#[async_trait]
pub trait RedditApi: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn request_token(&self, credentials: &RedditCredentials)
        -> Result<String, ContentError>;

    /// First entry of the subreddit's top-of-the-day listing, if any.
    async fn fetch_top_post(
        &self,
        token: &str,
        subreddit: &str,
    ) -> Result<Option<RawPost>, ContentError>;
}

struct DailyPost {
    day: NaiveDate,
    post: Option<TopPost>,
}

/// Fetches the subreddit's top post at most once per UTC day.
///
/// Every failure path ends in `None`: the countdown goes out without
/// enrichment rather than not at all.
pub struct ContentProvider<A: RedditApi> {
    api: A,
    credentials: Option<RedditCredentials>,
    settings: ContentSettings,
    token: RwLock<Option<AccessToken>>,
    // Held across the fetch so concurrent compositions share one request.
    daily: Mutex<Option<DailyPost>>,
}

impl<A: RedditApi> ContentProvider<A> {
    pub fn new(api: A, credentials: Option<RedditCredentials>, settings: ContentSettings) -> Self {
        Self {
            api,
            credentials,
            settings,
            token: RwLock::new(None),
            daily: Mutex::new(None),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn subreddit(&self) -> &str {
        &self.settings.subreddit
    }

    pub async fn get_access_token(&self) -> Option<String> {
        let now = Utc::now();
        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.is_valid_at(now) {
                return Some(cached.token.clone());
            }
        }

        let Some(credentials) = self.credentials.as_ref() else {
            tracing::warn!("Reddit credentials not configured, skipping Reddit integration");
            return None;
        };

        let result = retry::execute(
            "Reddit token request",
            &self.settings.retry,
            ContentError::is_retryable,
            || self.api.request_token(credentials),
        )
        .await;

        match result {
            Ok(token) => {
                *self.token.write().await = Some(AccessToken {
                    token: token.clone(),
                    expires_at: now + Duration::minutes(TOKEN_TTL_MINUTES),
                });
                tracing::info!("Reddit access token obtained");
                Some(token)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error getting Reddit access token");
                None
            }
        }
    }

    /// Today's top post. The first call of each day fetches; every later call
    /// that day reuses the result, including a `None`.
    pub async fn get_top_post_cached(&self, today: NaiveDate) -> Option<TopPost> {
        let mut daily = self.daily.lock().await;
        if let Some(cached) = daily.as_ref().filter(|c| c.day == today) {
            tracing::debug!(%today, "Using cached Reddit post");
            return cached.post.clone();
        }

        let post = self.fetch_top_post().await;
        if post.is_some() {
            tracing::info!(%today, "New Reddit post cached");
        }
        *daily = Some(DailyPost {
            day: today,
            post: post.clone(),
        });
        post
    }

    pub async fn fetch_top_post(&self) -> Option<TopPost> {
        let token = self.get_access_token().await?;
        let token = token.as_str();
        let subreddit = self.settings.subreddit.as_str();
        let api = &self.api;

        let result = retry::execute(
            "Reddit post fetch",
            &self.settings.retry,
            ContentError::is_retryable,
            move || api.fetch_top_post(token, subreddit),
        )
        .await;

        let raw = match result {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::warn!(subreddit, "No posts found");
                return None;
            }
            Err(e) => {
                tracing::error!(subreddit, error = %e, "Failed to fetch Reddit post");
                return None;
            }
        };

        let post = select_post(raw, self.settings.min_title_length);
        match &post {
            Some(post) => tracing::info!(
                title = %post.title,
                score = post.score,
                has_media = post.media_url.is_some(),
                "Fetched Reddit post"
            ),
            None => tracing::warn!(subreddit, "Top post does not meet criteria, skipping"),
        }
        post
    }

    pub async fn status(&self) -> ContentStatus {
        let now = Utc::now();
        let (has_token, token_expired) = {
            let token = self.token.read().await;
            (
                token.is_some(),
                token.as_ref().map_or(true, |t| !t.is_valid_at(now)),
            )
        };
        // never hold the token lock while waiting on `daily`; a fetch takes them
        // in the opposite order
        let daily = self.daily.lock().await;

        ContentStatus {
            configured: self.is_configured(),
            has_token,
            token_expired,
            has_cached_post: daily.as_ref().is_some_and(|d| d.post.is_some()),
            cache_day: daily.as_ref().map(|d| d.day),
        }
    }
}

/// Apply the content filters and pick the media to show.
fn select_post(raw: RawPost, min_title_length: usize) -> Option<TopPost> {
    if raw.over_18 || raw.spoiler {
        return None;
    }
    let title = raw
        .title
        .filter(|t| t.chars().count() >= min_title_length)?;

    let (media_url, media_kind) = match (raw.video_url, raw.preview_image_url) {
        (Some(video), _) => (Some(video), MediaKind::Video),
        (None, Some(image)) => (
            Some(html_escape::decode_html_entities(&image).into_owned()),
            MediaKind::Image,
        ),
        (None, None) => (None, MediaKind::None),
    };

    Some(TopPost {
        title,
        permalink_url: format!("https://reddit.com{}", raw.permalink),
        score: raw.score,
        comment_count: raw.num_comments,
        media_url,
        media_kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::retry::RetryPolicy;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FakeReddit {
        token_calls: AtomicU32,
        fetch_calls: AtomicU32,
        post: Result<Option<RawPost>, ContentError>,
    }

    impl FakeReddit {
        fn returning(post: Result<Option<RawPost>, ContentError>) -> Self {
            Self {
                token_calls: AtomicU32::new(0),
                fetch_calls: AtomicU32::new(0),
                post,
            }
        }
    }

    #[async_trait]
    impl RedditApi for FakeReddit {
        async fn request_token(&self, _: &RedditCredentials) -> Result<String, ContentError> {
            self.token_calls.fetch_add(1, Ordering::SeqCst);
            Ok("token".to_string())
        }

        async fn fetch_top_post(
            &self,
            token: &str,
            subreddit: &str,
        ) -> Result<Option<RawPost>, ContentError> {
            assert_eq!(token, "token");
            assert_eq!(subreddit, "arcraiders");
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.post.clone()
        }
    }

    fn credentials() -> RedditCredentials {
        RedditCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            username: "user".to_string(),
            password: "pass".to_string(),
        }
    }

    fn settings() -> ContentSettings {
        ContentSettings {
            retry: RetryPolicy::new(3, vec![std::time::Duration::ZERO]),
            ..ContentSettings::default()
        }
    }

    fn raw_post() -> RawPost {
        RawPost {
            title: Some("Look at this raider loadout".to_string()),
            permalink: "/r/arcraiders/comments/abc/look/".to_string(),
            score: 1234,
            num_comments: 56,
            preview_image_url: Some("https://preview.redd.it/a.jpg?width=640&amp;s=xyz".to_string()),
            ..RawPost::default()
        }
    }

    fn provider(api: FakeReddit) -> ContentProvider<FakeReddit> {
        ContentProvider::new(api, Some(credentials()), settings())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    #[tokio::test]
    async fn fetches_once_per_day() {
        let provider = provider(FakeReddit::returning(Ok(Some(raw_post()))));

        let first = provider.get_top_post_cached(day(1)).await;
        let second = provider.get_top_post_cached(day(1)).await;
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(provider.api.fetch_calls.load(Ordering::SeqCst), 1);

        provider.get_top_post_cached(day(2)).await;
        assert_eq!(provider.api.fetch_calls.load(Ordering::SeqCst), 2);
        // token outlives the day rollover
        assert_eq!(provider.api.token_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_result_is_cached_for_the_day() {
        let provider = provider(FakeReddit::returning(Ok(None)));

        assert!(provider.get_top_post_cached(day(1)).await.is_none());
        assert!(provider.get_top_post_cached(day(1)).await.is_none());
        assert_eq!(provider.api.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_failures_are_retried_then_cached_as_none() {
        let provider = provider(FakeReddit::returning(Err(ContentError::Status(503))));

        assert!(provider.get_top_post_cached(day(1)).await.is_none());
        assert!(provider.get_top_post_cached(day(1)).await.is_none());
        assert_eq!(provider.api.fetch_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let provider = provider(FakeReddit::returning(Err(ContentError::Status(403))));

        assert!(provider.fetch_top_post().await.is_none());
        assert_eq!(provider.api.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_credentials_skip_the_network() {
        let provider = ContentProvider::new(
            FakeReddit::returning(Ok(Some(raw_post()))),
            None,
            settings(),
        );

        assert!(provider.get_access_token().await.is_none());
        assert!(provider.get_top_post_cached(day(1)).await.is_none());
        assert_eq!(provider.api.token_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.api.fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn status_reports_token_and_cached_post() {
        let provider = provider(FakeReddit::returning(Ok(Some(raw_post()))));
        let before = provider.status().await;
        assert!(before.configured && !before.has_token && before.token_expired);
        assert_eq!(before.cache_day, None);

        provider.get_top_post_cached(day(1)).await;

        let status = provider.status().await;
        assert!(status.has_token && status.has_cached_post && !status.token_expired);
        assert_eq!(status.cache_day, Some(day(1)));
    }

    async fn seed_token(provider: &ContentProvider<FakeReddit>, expires_at: chrono::DateTime<Utc>) {
        *provider.token.write().await = Some(AccessToken {
            token: "old".to_string(),
            expires_at,
        });
    }

    #[tokio::test]
    async fn valid_token_is_reused() {
        let provider = provider(FakeReddit::returning(Ok(None)));
        seed_token(&provider, Utc::now() + Duration::minutes(10)).await;

        assert_eq!(provider.get_access_token().await.as_deref(), Some("old"));
        assert_eq!(provider.api.token_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn expired_token_is_exchanged_again() {
        let provider = provider(FakeReddit::returning(Ok(None)));
        seed_token(&provider, Utc::now() - Duration::seconds(1)).await;
        assert!(provider.status().await.token_expired);

        assert_eq!(provider.get_access_token().await.as_deref(), Some("token"));
        assert_eq!(provider.api.token_calls.load(Ordering::SeqCst), 1);

        // the fresh token is cached for the full lifetime
        let cached = provider.token.read().await.clone().unwrap();
        assert_eq!(cached.token, "token");
        assert!(cached.expires_at > Utc::now() + Duration::minutes(TOKEN_TTL_MINUTES - 1));
        assert!(!provider.status().await.token_expired);

        provider.get_access_token().await;
        assert_eq!(provider.api.token_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn filters_adult_spoiler_and_short_posts() {
        let adult = RawPost {
            over_18: true,
            ..raw_post()
        };
        let spoiler = RawPost {
            spoiler: true,
            ..raw_post()
        };
        let short = RawPost {
            title: Some("tiny".to_string()),
            ..raw_post()
        };
        let untitled = RawPost {
            title: None,
            ..raw_post()
        };

        for post in [adult, spoiler, short, untitled] {
            assert!(select_post(post, 10).is_none());
        }
    }

    #[test]
    fn unescapes_image_urls_and_prefers_video() {
        let post = select_post(raw_post(), 10).unwrap();
        assert_eq!(post.media_kind, MediaKind::Image);
        assert_eq!(
            post.media_url.as_deref(),
            Some("https://preview.redd.it/a.jpg?width=640&s=xyz")
        );
        assert_eq!(
            post.permalink_url,
            "https://reddit.com/r/arcraiders/comments/abc/look/"
        );

        let with_video = RawPost {
            video_url: Some("https://v.redd.it/abc/DASH_720.mp4".to_string()),
            ..raw_post()
        };
        let post = select_post(with_video, 10).unwrap();
        assert_eq!(post.media_kind, MediaKind::Video);
        assert_eq!(post.media_url.as_deref(), Some("https://v.redd.it/abc/DASH_720.mp4"));

        let bare = RawPost {
            preview_image_url: None,
            ..raw_post()
        };
        assert_eq!(select_post(bare, 10).unwrap().media_kind, MediaKind::None);
    }
}
