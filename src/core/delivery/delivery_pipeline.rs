use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::delivery_models::{
    AdminNotice, ChatError, DeliveryError, DeliveryOutcome, ResolvedChannel,
};
use crate::core::content::RedditApi;
use crate::core::guild_config::{GuildConfigService, GuildConfigStore};
use crate::core::message::{CountdownMessage, MessageComposer};
use crate::core::retry::{self, RetryPolicy};
use crate::core::scheduler::{CountdownTrigger, JobControl};
use crate::core::time::{days_remaining, has_passed};

/// What the pipeline needs from the chat platform. Implementations bound
/// every call with their own timeout and report it as [`ChatError::Timeout`].
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// `Ok(None)` when the channel does not exist or the bot cannot see it.
    async fn resolve_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<Option<ResolvedChannel>, ChatError>;

    async fn send_countdown(
        &self,
        channel_id: u64,
        message: &CountdownMessage,
    ) -> Result<(), ChatError>;

    /// Some text channel in the guild the bot can still post to.
    async fn find_notice_channel(&self, guild_id: u64) -> Result<Option<u64>, ChatError>;

    async fn send_notice(&self, channel_id: u64, notice: &AdminNotice) -> Result<(), ChatError>;
}

#[derive(Debug, Clone)]
pub struct DeliverySettings {
    pub release_date: DateTime<Utc>,
    pub retry: RetryPolicy,
}

/// Takes a guild from "it's time" to "message posted", or explains why not.
pub struct DeliveryPipeline<G: ChatGateway, S: GuildConfigStore, A: RedditApi> {
    gateway: G,
    configs: Arc<GuildConfigService<S>>,
    composer: MessageComposer<A>,
    settings: DeliverySettings,
}

impl<G: ChatGateway, S: GuildConfigStore, A: RedditApi> DeliveryPipeline<G, S, A> {
    pub fn new(
        gateway: G,
        configs: Arc<GuildConfigService<S>>,
        composer: MessageComposer<A>,
        settings: DeliverySettings,
    ) -> Self {
        Self {
            gateway,
            configs,
            composer,
            settings,
        }
    }

    pub async fn deliver(&self, guild_id: u64) -> DeliveryOutcome {
        self.deliver_at(guild_id, Utc::now()).await
    }

    pub async fn deliver_at(&self, guild_id: u64, now: DateTime<Utc>) -> DeliveryOutcome {
        let config = self.configs.get(guild_id).await;
        let Some(channel_id) = config.channel_id else {
            tracing::warn!(guild_id, "No channel configured for guild");
            return DeliveryOutcome::NotConfigured;
        };

        let release_date = self.settings.release_date;
        if has_passed(release_date, now) {
            tracing::info!(guild_id, "Game has launched, stopping countdown messages");
            return DeliveryOutcome::CountdownOver;
        }

        let days = days_remaining(release_date, now);
        tracing::info!(guild_id, channel_id, days_remaining = days, "Posting countdown message");

        let result = async {
            let channel = self.checked_channel(guild_id, channel_id).await?;
            let message = self.composer.compose(days, release_date).await;
            self.send_with_retry(channel.channel_id, &message).await
        }
        .await;

        match result {
            Ok(()) => {
                tracing::info!(guild_id, days_remaining = days, "Countdown message posted");
                DeliveryOutcome::Delivered {
                    days_remaining: days,
                }
            }
            Err(e) => {
                tracing::error!(guild_id, channel_id, error = %e, "Error posting countdown message");
                self.notify_admins(guild_id, &e).await;

                let evicted = e.is_permanent() && self.evict(guild_id).await;
                DeliveryOutcome::Failed { evicted }
            }
        }
    }

    /// Post a preview to the configured channel right now. Errors go back to
    /// the caller untouched: no admin notice, no eviction.
    ///
    /// Returns the days-remaining value the preview was built for.
    pub async fn send_test(
        &self,
        guild_id: u64,
        days_override: Option<i64>,
    ) -> Result<i64, DeliveryError> {
        let config = self.configs.get(guild_id).await;
        let channel_id = config.channel_id.ok_or(DeliveryError::NotConfigured)?;

        let release_date = self.settings.release_date;
        let days = days_override.unwrap_or_else(|| days_remaining(release_date, Utc::now()));

        let channel = self.checked_channel(guild_id, channel_id).await?;
        let message = self.composer.compose_preview(days, release_date).await;
        self.send_with_retry(channel.channel_id, &message).await?;

        tracing::info!(guild_id, days_remaining = days, "Test countdown message posted");
        Ok(days)
    }

    async fn checked_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<ResolvedChannel, DeliveryError> {
        let channel = match self.gateway.resolve_channel(guild_id, channel_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) => return Err(DeliveryError::ChannelUnavailable { channel_id }),
            Err(e) if e.is_permanent() => {
                return Err(DeliveryError::ChannelUnavailable { channel_id })
            }
            Err(e) => return Err(e.into()),
        };

        if !channel.can_send {
            return Err(DeliveryError::PermissionDenied { channel_id });
        }
        Ok(channel)
    }

    async fn send_with_retry(
        &self,
        channel_id: u64,
        message: &CountdownMessage,
    ) -> Result<(), DeliveryError> {
        let gateway = &self.gateway;

        retry::execute(
            "Discord message send",
            &self.settings.retry,
            ChatError::is_retryable,
            move || gateway.send_countdown(channel_id, message),
        )
        .await
        .map_err(DeliveryError::from)
    }

    /// Tell the guild's admins what went wrong. Failures here are logged and
    /// go no further.
    async fn notify_admins(&self, guild_id: u64, error: &DeliveryError) {
        let channel_id = match self.gateway.find_notice_channel(guild_id).await {
            Ok(Some(channel_id)) => channel_id,
            Ok(None) => {
                tracing::warn!(guild_id, "No accessible channel found for admin notice");
                return;
            }
            Err(e) => {
                tracing::error!(guild_id, error = %e, "Failed to notify admins");
                return;
            }
        };

        let notice =
            AdminNotice::delivery_failure(&self.composer.settings().game_name, &error.to_string());
        let gateway = &self.gateway;
        let notice = &notice;

        let sent = retry::execute(
            "Admin notice send",
            &self.settings.retry,
            ChatError::is_retryable,
            move || gateway.send_notice(channel_id, notice),
        )
        .await;

        match sent {
            Ok(()) => tracing::info!(guild_id, channel_id, "Posted configuration issue notice"),
            Err(e) => tracing::error!(guild_id, error = %e, "Failed to notify admins"),
        }
    }

    async fn evict(&self, guild_id: u64) -> bool {
        tracing::info!(guild_id, "Removing server configuration due to access error");
        self.configs.remove(guild_id).await.is_ok()
    }
}

#[async_trait]
impl<G, S, A> CountdownTrigger for DeliveryPipeline<G, S, A>
where
    G: ChatGateway + 'static,
    S: GuildConfigStore + 'static,
    A: RedditApi + 'static,
{
    async fn fire(&self, guild_id: u64) -> JobControl {
        match self.deliver(guild_id).await {
            DeliveryOutcome::Delivered { .. } | DeliveryOutcome::Failed { evicted: false } => {
                JobControl::Continue
            }
            DeliveryOutcome::NotConfigured
            | DeliveryOutcome::CountdownOver
            | DeliveryOutcome::Failed { evicted: true } => JobControl::Stop,
        }
    }
}
