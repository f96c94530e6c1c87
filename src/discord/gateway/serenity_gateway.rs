// ChatGateway backed by serenity's HTTP client and cache.
//
// Permission checks read the guild from the cache and need the bot's own
// member entry. When either is missing the check is skipped and the send
// itself reports the problem. Cache guards are never held across an await.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use crate::core::delivery::{AdminNotice, ChatError, ChatGateway, ResolvedChannel};
use crate::core::message::CountdownMessage;
use crate::discord::embeds;

pub struct SerenityGateway {
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
    timeout: Duration,
}

impl SerenityGateway {
    pub fn new(http: Arc<serenity::Http>, cache: Arc<serenity::Cache>, timeout: Duration) -> Self {
        Self {
            http,
            cache,
            timeout,
        }
    }

    async fn call<T, F>(&self, request: F) -> Result<T, ChatError>
    where
        F: Future<Output = Result<T, serenity::Error>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result.map_err(chat_error),
            Err(_) => Err(ChatError::Timeout),
        }
    }

    fn can_post_in(&self, channel: &serenity::GuildChannel) -> Option<bool> {
        let me = self.cache.current_user().id;
        let guild = self.cache.guild(channel.guild_id)?;
        let member = guild.members.get(&me)?;
        Some(
            guild
                .user_permissions_in(channel, member)
                .contains(posting_permissions()),
        )
    }

    async fn send_embed(
        &self,
        channel_id: u64,
        embed: serenity::CreateEmbed,
    ) -> Result<(), ChatError> {
        let message = serenity::CreateMessage::new().embed(embed);
        self.call(serenity::ChannelId::new(channel_id).send_message(&self.http, message))
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl ChatGateway for SerenityGateway {
    async fn resolve_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<Option<ResolvedChannel>, ChatError> {
        let channel = match self
            .call(self.http.get_channel(serenity::ChannelId::new(channel_id)))
            .await
        {
            Ok(channel) => channel,
            Err(ChatError::UnknownChannel | ChatError::MissingAccess) => return Ok(None),
            Err(e) => return Err(e),
        };

        let Some(channel) = channel.guild() else {
            return Ok(None);
        };
        if channel.guild_id.get() != guild_id {
            tracing::warn!(guild_id, channel_id, "Configured channel belongs to another guild");
            return Ok(None);
        }

        let can_send = self.can_post_in(&channel).unwrap_or_else(|| {
            tracing::debug!(guild_id, channel_id, "Guild not cached, skipping permission check");
            true
        });

        Ok(Some(ResolvedChannel {
            channel_id,
            name: channel.name.clone(),
            can_send,
        }))
    }

    async fn send_countdown(
        &self,
        channel_id: u64,
        message: &CountdownMessage,
    ) -> Result<(), ChatError> {
        self.send_embed(channel_id, embeds::countdown_embed(message))
            .await
    }

    async fn find_notice_channel(&self, guild_id: u64) -> Result<Option<u64>, ChatError> {
        Ok(first_writable_channel(&self.cache, serenity::GuildId::new(guild_id)).map(|id| id.get()))
    }

    async fn send_notice(&self, channel_id: u64, notice: &AdminNotice) -> Result<(), ChatError> {
        self.send_embed(channel_id, embeds::notice_embed(notice)).await
    }
}

fn posting_permissions() -> serenity::Permissions {
    serenity::Permissions::VIEW_CHANNEL
        | serenity::Permissions::SEND_MESSAGES
        | serenity::Permissions::EMBED_LINKS
}

/// Topmost text channel the bot can post embeds to, from the cache.
pub fn first_writable_channel(
    cache: &serenity::Cache,
    guild_id: serenity::GuildId,
) -> Option<serenity::ChannelId> {
    let me = cache.current_user().id;
    let guild = cache.guild(guild_id)?;
    let member = guild.members.get(&me)?;

    guild
        .channels
        .values()
        .filter(|channel| channel.kind == serenity::ChannelType::Text)
        .filter(|channel| {
            guild
                .user_permissions_in(channel, member)
                .contains(posting_permissions())
        })
        .min_by_key(|channel| (channel.position, channel.id))
        .map(|channel| channel.id)
}

fn chat_error(err: serenity::Error) -> ChatError {
    match err {
        serenity::Error::Http(::serenity::http::HttpError::UnsuccessfulRequest(response)) => {
            ChatError::from_response(
                response.status_code.as_u16(),
                Some(response.error.code as i64),
                response.error.message,
            )
        }
        other => ChatError::Api {
            status: 0,
            code: None,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posting_needs_view_send_and_embed() {
        let perms = posting_permissions();
        assert!(perms.contains(serenity::Permissions::SEND_MESSAGES));
        assert!(perms.contains(serenity::Permissions::EMBED_LINKS));
        assert!(perms.contains(serenity::Permissions::VIEW_CHANNEL));
        assert!(!serenity::Permissions::SEND_MESSAGES.contains(perms));
    }

    #[test]
    fn non_http_errors_keep_their_message() {
        let err = chat_error(serenity::Error::Other("gateway closed"));
        assert_eq!(
            err,
            ChatError::Api {
                status: 0,
                code: None,
                message: "gateway closed".to_string(),
            }
        );
    }
}
