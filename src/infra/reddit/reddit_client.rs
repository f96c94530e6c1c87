use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;

use crate::core::content::{ContentError, RawPost, RedditApi, RedditCredentials};

const TOKEN_ENDPOINT: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
const BOT_USER_AGENT: &str = "ArcRaidersCountdownBot/1.0.0";

/// Reddit OAuth client. Only the two calls the content provider needs.
pub struct RedditHttpClient {
    client: Client,
    token_endpoint: String,
    api_base: String,
}

impl RedditHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, ContentError> {
        Self::with_endpoints(timeout, TOKEN_ENDPOINT, API_BASE)
    }

    /// Point the client at another Reddit-compatible host.
    pub fn with_endpoints(
        timeout: Duration,
        token_endpoint: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, ContentError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BOT_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ContentError::Request(e.to_string()))?;

        Ok(Self {
            client,
            token_endpoint: token_endpoint.into(),
            api_base: api_base.into(),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ContentError {
    if err.is_timeout() {
        ContentError::Timeout
    } else if err.is_connect() {
        ContentError::Connect(err.to_string())
    } else if err.is_decode() {
        ContentError::Decode(err.to_string())
    } else if let Some(status) = err.status() {
        ContentError::Status(status.as_u16())
    } else {
        ContentError::Request(err.to_string())
    }
}

#[async_trait]
impl RedditApi for RedditHttpClient {
    async fn request_token(
        &self,
        credentials: &RedditCredentials,
    ) -> Result<String, ContentError> {
        let resp = self
            .client
            .post(&self.token_endpoint)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ContentError::Status(status.as_u16()));
        }

        let body: ApiTokenResponse = resp.json().await.map_err(map_reqwest_error)?;
        body.into_token()
    }

    async fn fetch_top_post(
        &self,
        token: &str,
        subreddit: &str,
    ) -> Result<Option<RawPost>, ContentError> {
        let url = format!("{}/r/{}/top.json", self.api_base, subreddit);
        let started = std::time::Instant::now();

        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("limit", "1"), ("t", "day")])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = resp.status();
        tracing::debug!(
            %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Reddit API request"
        );
        if !status.is_success() {
            return Err(ContentError::Status(status.as_u16()));
        }

        let listing: ApiListing = resp.json().await.map_err(map_reqwest_error)?;
        Ok(listing.first_post())
    }
}

#[derive(Debug, Deserialize)]
struct ApiTokenResponse {
    access_token: Option<String>,
    error: Option<serde_json::Value>,
}

impl ApiTokenResponse {
    fn into_token(self) -> Result<String, ContentError> {
        if let Some(error) = self.error {
            return Err(ContentError::TokenRejected(error.to_string()));
        }
        self.access_token
            .ok_or_else(|| ContentError::TokenRejected("response had no access_token".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ApiListing {
    data: ApiListingData,
}

#[derive(Debug, Deserialize)]
struct ApiListingData {
    #[serde(default)]
    children: Vec<ApiChild>,
}

#[derive(Debug, Deserialize)]
struct ApiChild {
    data: ApiPost,
}

#[derive(Debug, Deserialize)]
struct ApiPost {
    title: Option<String>,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u64,
    #[serde(default)]
    over_18: bool,
    #[serde(default)]
    spoiler: bool,
    preview: Option<ApiPreview>,
    media: Option<ApiMedia>,
}

#[derive(Debug, Deserialize)]
struct ApiPreview {
    #[serde(default)]
    images: Vec<ApiPreviewImage>,
}

#[derive(Debug, Deserialize)]
struct ApiPreviewImage {
    source: Option<ApiImageSource>,
}

#[derive(Debug, Deserialize)]
struct ApiImageSource {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMedia {
    reddit_video: Option<ApiRedditVideo>,
}

#[derive(Debug, Deserialize)]
struct ApiRedditVideo {
    fallback_url: Option<String>,
}

impl ApiListing {
    fn first_post(self) -> Option<RawPost> {
        let post = self.data.children.into_iter().next()?.data;

        let preview_image_url = post
            .preview
            .and_then(|p| p.images.into_iter().next())
            .and_then(|image| image.source)
            .and_then(|source| source.url);
        let video_url = post
            .media
            .and_then(|m| m.reddit_video)
            .and_then(|v| v.fallback_url);

        Some(RawPost {
            title: post.title,
            permalink: post.permalink,
            score: post.score,
            num_comments: post.num_comments,
            over_18: post.over_18,
            spoiler: post.spoiler,
            preview_image_url,
            video_url,
        })
    }
}
