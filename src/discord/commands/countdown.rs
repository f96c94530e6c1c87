// Countdown slash commands.
//
// Every command is guild-only, needs Manage Server and answers ephemerally.
// The permission denial reply itself lives in the framework's error hook.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;

use crate::core::delivery::DeliveryPipeline;
use crate::core::content::ContentProvider;
use crate::core::emoji::{EmojiSelector, Phase};
use crate::core::guild_config::{GuildConfigService, ServerConfigUpdate};
use crate::core::health::HealthState;
use crate::core::scheduler::CountdownScheduler;
use crate::core::time::{days_remaining, has_passed, parse_time, supported_formats};
use crate::discord::embeds;
use crate::discord::gateway::SerenityGateway;
use crate::infra::guild_config::JsonGuildConfigStore;
use crate::infra::reddit::RedditHttpClient;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

pub type Delivery = DeliveryPipeline<SerenityGateway, JsonGuildConfigStore, RedditHttpClient>;

pub const PERMISSION_DENIED: &str =
    "You need the \"Manage Server\" permission to use this command.";

/// Shared across all commands and event handlers.
pub struct Data {
    pub game_name: String,
    pub release_date: DateTime<Utc>,
    pub configs: Arc<GuildConfigService<JsonGuildConfigStore>>,
    pub content: Arc<ContentProvider<RedditHttpClient>>,
    pub delivery: Arc<Delivery>,
    pub scheduler: Arc<CountdownScheduler>,
    pub health: Arc<HealthState>,
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum TestPhase {
    #[name = "early"]
    Early,
    #[name = "mid"]
    Mid,
    #[name = "final_month"]
    FinalMonth,
    #[name = "final_week"]
    FinalWeek,
    #[name = "final_days"]
    FinalDays,
}

impl From<TestPhase> for Phase {
    fn from(choice: TestPhase) -> Self {
        match choice {
            TestPhase::Early => Phase::Early,
            TestPhase::Mid => Phase::Mid,
            TestPhase::FinalMonth => Phase::FinalMonth,
            TestPhase::FinalWeek => Phase::FinalWeek,
            TestPhase::FinalDays => Phase::FinalDays,
        }
    }
}

async fn reply(ctx: Context<'_>, content: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

fn launched_message(game_name: &str, release_date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!(
        "🎉 {game_name} has already launched! Countdown messages have stopped.\n\n\
         Launch date: {}\nCurrent time: {}\n\n\
         *The bot may be updated with new features in the future!*",
        release_date.format("%B %-d, %Y"),
        now.format("%B %-d, %Y"),
    )
}

/// Reply and return true once the release date has passed.
async fn refuse_after_launch(ctx: Context<'_>) -> Result<bool, Error> {
    let data = ctx.data();
    let now = Utc::now();
    if !has_passed(data.release_date, now) {
        return Ok(false);
    }
    reply(ctx, launched_message(&data.game_name, data.release_date, now)).await?;
    Ok(true)
}

fn channel_name_matches(candidate: &str, wanted: &str) -> bool {
    let wanted = wanted.trim().trim_start_matches('#');
    !wanted.is_empty() && candidate.eq_ignore_ascii_case(wanted)
}

/// Set the channel countdown messages are posted to
#[poise::command(
    slash_command,
    guild_only,
    rename = "countdown-setup",
    required_permissions = "MANAGE_GUILD"
)]
pub async fn countdown_setup(
    ctx: Context<'_>,
    #[description = "Channel name to post countdown messages (e.g., \"general\")"] channel: String,
) -> Result<(), Error> {
    if refuse_after_launch(ctx).await? {
        return Ok(());
    }
    let guild_id = ctx.guild_id().ok_or("Must be run in a guild")?;

    let found = ctx.guild().and_then(|guild| {
        guild
            .channels
            .values()
            .filter(|c| c.kind == serenity::ChannelType::Text)
            .find(|c| channel_name_matches(&c.name, &channel))
            .map(|c| (c.id.get(), c.name.clone()))
    });

    let Some((channel_id, channel_name)) = found else {
        reply(
            ctx,
            format!(
                "Channel \"#{channel}\" not found. Make sure the channel exists and I have access to it."
            ),
        )
        .await?;
        return Ok(());
    };

    let data = ctx.data();
    let update = ServerConfigUpdate::channel(channel_id, channel_name.clone())
        .with_post_time(data.configs.default_post_time());
    let config = data.configs.update(guild_id.get(), update).await?;
    data.scheduler
        .schedule_guild(guild_id.get(), &config.post_time)
        .await?;

    tracing::info!(
        guild_id = guild_id.get(),
        user_id = ctx.author().id.get(),
        channel = %channel_name,
        "Countdown channel configured"
    );

    reply(
        ctx,
        format!(
            "Configuration complete!\nChannel: #{channel_name}\nTime: {} (UTC) - Use `/countdown-time` to change",
            config.post_time
        ),
    )
    .await
}

/// Set the daily post time in UTC
#[poise::command(
    slash_command,
    guild_only,
    rename = "countdown-time",
    required_permissions = "MANAGE_GUILD"
)]
pub async fn countdown_time(
    ctx: Context<'_>,
    #[description = "Time to post daily in UTC (e.g., \"3am\", \"15:00\", \"3:30pm\")"] time: String,
) -> Result<(), Error> {
    if refuse_after_launch(ctx).await? {
        return Ok(());
    }
    let guild_id = ctx.guild_id().ok_or("Must be run in a guild")?.get();

    if let Err(e) = parse_time(&time) {
        reply(
            ctx,
            format!(
                "Invalid time format. {e}\n\nSupported formats: {}",
                supported_formats().join(", ")
            ),
        )
        .await?;
        return Ok(());
    }

    let data = ctx.data();
    let config = data
        .configs
        .update(guild_id, ServerConfigUpdate::post_time(time.trim()))
        .await?;

    if config.is_configured() {
        data.scheduler.reschedule(guild_id, &config.post_time).await?;
    }

    tracing::info!(guild_id, user_id = ctx.author().id.get(), post_time = %config.post_time, "Post time updated");

    reply(
        ctx,
        format!(
            "Post time updated to {} (UTC) and rescheduled immediately!",
            config.post_time
        ),
    )
    .await
}

/// View the current countdown configuration
#[poise::command(
    slash_command,
    guild_only,
    rename = "countdown-status",
    required_permissions = "MANAGE_GUILD"
)]
pub async fn countdown_status(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be run in a guild")?.get();
    let data = ctx.data();

    let config = data.configs.get(guild_id).await;
    let stats = data.configs.stats().await;
    let phase = EmojiSelector::new().phase_info(days_remaining(data.release_date, Utc::now()));
    let job_time = data.scheduler.scheduled_time(guild_id).await;
    let content = data.content.status().await;
    tracing::info!(
        guild_id,
        configured_servers = stats.configured_servers,
        total_servers = stats.total_servers,
        phase = phase.phase.key(),
        phase_name = phase.name,
        phase_description = phase.description,
        phase_emojis = phase.target_count,
        job_time = ?job_time,
        reddit_configured = content.configured,
        reddit_token = content.has_token && !content.token_expired,
        cached_post = content.has_cached_post,
        cache_day = ?content.cache_day,
        "Status viewed"
    );

    let channel = match &config.channel_name {
        Some(name) if config.is_configured() => format!("#{name}"),
        _ => "Not configured".to_string(),
    };
    reply(
        ctx,
        format!("Channel: {channel}\nTime: {} (UTC)", config.post_time),
    )
    .await
}

/// Post a test countdown message now
#[poise::command(
    slash_command,
    guild_only,
    rename = "countdown-test",
    required_permissions = "MANAGE_GUILD"
)]
pub async fn countdown_test(
    ctx: Context<'_>,
    #[description = "Preview a specific countdown phase"] phase: Option<TestPhase>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be run in a guild")?.get();
    let data = ctx.data();

    if !data.configs.get(guild_id).await.is_configured() {
        reply(ctx, "No channel configured. Use `/countdown-setup` first.").await?;
        return Ok(());
    }

    reply(ctx, "Sending test message...").await?;

    let days_override = phase.map(|p| Phase::from(p).sample_days());
    match data.delivery.send_test(guild_id, days_override).await {
        Ok(days) => {
            tracing::info!(guild_id, days_remaining = days, "Test message sent");
            Ok(())
        }
        Err(e) => {
            tracing::error!(guild_id, error = %e, "Error testing countdown message");
            reply(ctx, format!("❌ Error testing countdown message: {e}")).await
        }
    }
}

/// Spread the love <3
#[poise::command(
    slash_command,
    guild_only,
    rename = "countdown-love",
    required_permissions = "MANAGE_GUILD"
)]
pub async fn countdown_love(ctx: Context<'_>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .embed(embeds::love_embed())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Central error hook: fixed denial text for missing permissions, a short
/// apology for command failures, poise's defaults for the rest.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
            if let Err(e) = reply(ctx, PERMISSION_DENIED).await {
                tracing::warn!(error = %e, "Failed to send permission denial");
            }
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!(command = %ctx.command().name, error = %error, "Command failed");
            if let Err(e) = reply(ctx, "❌ Something went wrong running that command.").await {
                tracing::warn!(error = %e, "Failed to report command error");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!(error = %e, "Error while handling framework error");
            }
        }
    }
}
