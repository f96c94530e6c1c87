use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::message_models::{
    clamp_chars, CountdownMessage, EmbedField, COLOR_DEFAULT, COLOR_LAUNCH, COLOR_URGENT,
    DESCRIPTION_LIMIT, FIELD_VALUE_LIMIT,
};
use super::social_message_queue::SocialMessageQueue;
use crate::core::content::{ContentProvider, RedditApi, TopPost};
use crate::core::emoji::{fit_title, EmojiSelector};

/// Game-specific text and artwork used in every countdown message.
#[derive(Debug, Clone)]
pub struct CountdownSettings {
    pub game_name: String,
    pub studio: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Error)]
enum ComposeError {
    #[error("title is {0} characters even without emojis")]
    TitleTooLong(usize),
}

pub struct MessageComposer<A: RedditApi> {
    emojis: EmojiSelector,
    content: Arc<ContentProvider<A>>,
    social: Arc<dyn SocialMessageQueue>,
    settings: CountdownSettings,
}

impl<A: RedditApi> MessageComposer<A> {
    pub fn new(
        content: Arc<ContentProvider<A>>,
        social: Arc<dyn SocialMessageQueue>,
        settings: CountdownSettings,
    ) -> Self {
        Self {
            emojis: EmojiSelector::new(),
            content,
            social,
            settings,
        }
    }

    pub fn settings(&self) -> &CountdownSettings {
        &self.settings
    }

    /// Build today's countdown message, consuming the queued social message if
    /// there is one. Never fails: anything unexpected yields
    /// [`CountdownMessage::fallback`].
    pub async fn compose(
        &self,
        days_remaining: i64,
        release_date: DateTime<Utc>,
    ) -> CountdownMessage {
        let social = match self.social.take().await {
            Ok(message) => message.filter(|m| !m.trim().is_empty()),
            Err(e) => {
                tracing::error!(error = %e, "Error reading social message");
                None
            }
        };
        if social.is_some() {
            tracing::info!("Social message consumed");
        }

        self.compose_with(days_remaining, release_date, social).await
    }

    /// Same payload as [`compose`](Self::compose) but leaves the queued social
    /// message alone. Used for test posts.
    pub async fn compose_preview(
        &self,
        days_remaining: i64,
        release_date: DateTime<Utc>,
    ) -> CountdownMessage {
        self.compose_with(days_remaining, release_date, None).await
    }

    async fn compose_with(
        &self,
        days_remaining: i64,
        release_date: DateTime<Utc>,
        body_override: Option<String>,
    ) -> CountdownMessage {
        let post = self
            .content
            .get_top_post_cached(Utc::now().date_naive())
            .await;

        match self.build(days_remaining, release_date, body_override, post) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(days_remaining, error = %e, "Error creating countdown message");
                CountdownMessage::fallback()
            }
        }
    }

    fn build(
        &self,
        days_remaining: i64,
        release_date: DateTime<Utc>,
        body_override: Option<String>,
        post: Option<TopPost>,
    ) -> Result<CountdownMessage, ComposeError> {
        let game = &self.settings.game_name;
        let date = release_date.format("%B %-d, %Y").to_string();

        let (base_title, default_body, color, with_emojis) = match days_remaining {
            0 => (
                format!("🎉 **{} IS NOW LIVE!** 🎉", game.to_uppercase()),
                format!("{game} has launched on {date}!"),
                COLOR_LAUNCH,
                false,
            ),
            1 => (
                format!("⚠️⚠️⚠️ **1 DAY** until {game}!"),
                format!("{game} launches TOMORROW - {date}!"),
                COLOR_URGENT,
                false,
            ),
            n if n <= 7 => (
                format!("⚠️ **{n} DAYS** until {game}!"),
                format!("Only {n} days left until {date}!"),
                COLOR_URGENT,
                true,
            ),
            n => (
                format!("**{n} DAYS** until {game}!"),
                format!("{game} launches on {date}"),
                COLOR_DEFAULT,
                true,
            ),
        };

        let placement = if with_emojis {
            self.emojis.placement_for_title(days_remaining)
        } else {
            String::new()
        };
        let title = fit_title(&base_title, &placement)
            .ok_or_else(|| ComposeError::TitleTooLong(base_title.chars().count()))?;

        let description = clamp_chars(
            &body_override.unwrap_or(default_body),
            DESCRIPTION_LIMIT,
        );

        let mut message = CountdownMessage {
            title,
            description,
            color,
            thumbnail_url: Some(self.settings.thumbnail_url.clone()),
            image_url: None,
            footer: Some(format!("{} - {}", game, self.settings.studio)),
            fields: Vec::new(),
        };

        if let Some(post) = post {
            message.fields.push(EmbedField {
                name: format!("Top r/{} Post Today", self.content.subreddit()),
                value: clamp_chars(
                    &format!(
                        "[{}]({})\n⬆️ {} upvotes • 💬 {} comments",
                        post.title, post.permalink_url, post.score, post.comment_count
                    ),
                    FIELD_VALUE_LIMIT,
                ),
                inline: false,
            });
            tracing::debug!(media_kind = ?post.media_kind, "Attaching today's top post");
            // Discord renders a still for video URLs too.
            message.image_url = post.media_url;
        }

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::{ContentError, ContentSettings, RawPost, RedditCredentials};
    use crate::core::emoji::emoji_service::TITLE_CHAR_LIMIT;
    use crate::infra::social_message::FileSocialMessageQueue;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use tempfile::TempDir;

    struct StaticReddit(Option<RawPost>);

    #[async_trait]
    impl RedditApi for StaticReddit {
        async fn request_token(&self, _: &RedditCredentials) -> Result<String, ContentError> {
            Ok("token".to_string())
        }

        async fn fetch_top_post(
            &self,
            _: &str,
            _: &str,
        ) -> Result<Option<RawPost>, ContentError> {
            Ok(self.0.clone())
        }
    }

    fn release() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 30, 0, 0, 0).unwrap()
    }

    fn settings(game_name: &str) -> CountdownSettings {
        CountdownSettings {
            game_name: game_name.to_string(),
            studio: "Embark Studios".to_string(),
            thumbnail_url: "https://cdn.akamai.steamstatic.com/steam/apps/2389730/header.jpg"
                .to_string(),
        }
    }

    fn composer_with(
        dir: &TempDir,
        post: Option<RawPost>,
        game_name: &str,
    ) -> (MessageComposer<StaticReddit>, Arc<FileSocialMessageQueue>) {
        let credentials = post.as_ref().map(|_| RedditCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            username: "user".to_string(),
            password: "pass".to_string(),
        });
        let content = Arc::new(ContentProvider::new(
            StaticReddit(post),
            credentials,
            ContentSettings::default(),
        ));
        let queue = Arc::new(FileSocialMessageQueue::new(dir.path().join("next-message.txt")));
        let composer = MessageComposer::new(content, queue.clone(), settings(game_name));
        (composer, queue)
    }

    fn composer(dir: &TempDir) -> (MessageComposer<StaticReddit>, Arc<FileSocialMessageQueue>) {
        composer_with(dir, None, "Arc Raiders")
    }

    #[tokio::test]
    async fn social_message_is_used_exactly_once() {
        let dir = TempDir::new().unwrap();
        let (composer, queue) = composer(&dir);
        queue.push("Raiders, gear up!").await.unwrap();

        let first = composer.compose(40, release()).await;
        let second = composer.compose(40, release()).await;

        assert_eq!(first.description, "Raiders, gear up!");
        assert_eq!(second.description, "Arc Raiders launches on October 30, 2025");
    }

    #[tokio::test]
    async fn preview_leaves_the_social_message_queued() {
        let dir = TempDir::new().unwrap();
        let (composer, queue) = composer(&dir);
        queue.push("Saved for the real post").await.unwrap();

        let preview = composer.compose_preview(40, release()).await;
        assert_eq!(preview.description, "Arc Raiders launches on October 30, 2025");
        assert_eq!(
            composer.compose(40, release()).await.description,
            "Saved for the real post"
        );
    }

    #[tokio::test]
    async fn one_day_left_uses_the_tomorrow_title() {
        let dir = TempDir::new().unwrap();
        let (composer, _) = composer(&dir);

        let message = composer.compose(1, release()).await;
        assert_eq!(message.title, "⚠️⚠️⚠️ **1 DAY** until Arc Raiders!");
        assert_eq!(
            message.description,
            "Arc Raiders launches TOMORROW - October 30, 2025!"
        );
        assert_eq!(message.color, COLOR_URGENT);
    }

    #[tokio::test]
    async fn launch_day_ignores_emojis() {
        let dir = TempDir::new().unwrap();
        let (composer, _) = composer(&dir);

        let message = composer.compose(0, release()).await;
        assert_eq!(message.title, "🎉 **ARC RAIDERS IS NOW LIVE!** 🎉");
        assert_eq!(message.color, COLOR_LAUNCH);
    }

    #[tokio::test]
    async fn final_week_and_default_titles_carry_emojis() {
        let dir = TempDir::new().unwrap();
        let (composer, _) = composer(&dir);

        let urgent = composer.compose(5, release()).await;
        assert!(urgent.title.starts_with("⚠️ **5 DAYS** until Arc Raiders! <"));
        assert_eq!(urgent.description, "Only 5 days left until October 30, 2025!");

        let early = composer.compose(80, release()).await;
        assert!(early.title.starts_with("**80 DAYS** until Arc Raiders! <"));
        assert_eq!(early.color, COLOR_DEFAULT);
        assert_eq!(early.footer.as_deref(), Some("Arc Raiders - Embark Studios"));
        assert!(early.fields.is_empty());
    }

    #[tokio::test]
    async fn top_post_becomes_a_field_and_the_image() {
        let dir = TempDir::new().unwrap();
        let post = RawPost {
            title: Some("Best extraction clip of the week".to_string()),
            permalink: "/r/arcraiders/comments/1/best/".to_string(),
            score: 900,
            num_comments: 42,
            preview_image_url: Some("https://preview.redd.it/p.jpg?a=1&amp;b=2".to_string()),
            ..RawPost::default()
        };
        let (composer, _) = composer_with(&dir, Some(post), "Arc Raiders");

        let message = composer.compose(20, release()).await;
        assert_eq!(message.fields.len(), 1);
        assert_eq!(message.fields[0].name, "Top r/arcraiders Post Today");
        assert_eq!(
            message.fields[0].value,
            "[Best extraction clip of the week](https://reddit.com/r/arcraiders/comments/1/best/)\n⬆️ 900 upvotes • 💬 42 comments"
        );
        assert_eq!(
            message.image_url.as_deref(),
            Some("https://preview.redd.it/p.jpg?a=1&b=2")
        );
    }

    #[tokio::test]
    async fn impossible_title_falls_back_to_error_payload() {
        let dir = TempDir::new().unwrap();
        let huge_name = "A".repeat(TITLE_CHAR_LIMIT);
        let (composer, _) = composer_with(&dir, None, &huge_name);

        assert_eq!(
            composer.compose(30, release()).await,
            CountdownMessage::fallback()
        );
    }
}
