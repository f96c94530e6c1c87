// Guild lifecycle: ready, join and leave.

use std::collections::HashSet;

use chrono::Utc;
use poise::serenity_prelude as serenity;

use crate::discord::commands::presence;
use crate::discord::embeds;
use crate::discord::gateway::first_writable_channel;
use crate::discord::{Data, Error};

/// Event handler for non-command Discord events.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::GuildCreate { guild, is_new } => {
            data.health.set_server_count(ctx.cache.guild_count());
            if *is_new == Some(true) {
                handle_guild_join(ctx, data, guild).await;
            }
        }
        serenity::FullEvent::GuildDelete { incomplete, .. } => {
            // An outage also produces GuildDelete; only act when we were removed.
            if !incomplete.unavailable {
                handle_guild_leave(ctx, data, incomplete.id).await;
            }
        }
        _ => {}
    }

    Ok(())
}

/// Runs once from the framework setup, after `Data` is built.
pub async fn on_ready(ctx: &serenity::Context, ready: &serenity::Ready, data: &Data) {
    let live: HashSet<u64> = ready.guilds.iter().map(|g| g.id.get()).collect();
    data.health.set_server_count(live.len());

    let removed = data.configs.cleanup_orphans(&live).await;
    if removed > 0 {
        tracing::info!(removed, "Cleaned up orphaned server configurations");
    }

    let configs = data.configs.all().await;
    let scheduled = data
        .scheduler
        .schedule_all(&configs, data.release_date, Utc::now())
        .await;
    let configured = data.configs.configured_guilds().await;
    if scheduled < configured.len() {
        tracing::warn!(
            configured = configured.len(),
            scheduled,
            "Some configured guilds have no countdown job"
        );
    }

    presence::on_ready(ctx, &data.game_name);
    let active_jobs = data.scheduler.active_jobs().await;
    tracing::info!(
        user = %ready.user.name,
        guilds = live.len(),
        configured = configured.len(),
        active_jobs,
        "Bot is ready"
    );
}

async fn handle_guild_join(ctx: &serenity::Context, data: &Data, guild: &serenity::Guild) {
    tracing::info!(guild_id = guild.id.get(), guild_name = %guild.name, members = guild.member_count, "Joined guild");

    let Some(channel_id) = first_writable_channel(&ctx.cache, guild.id) else {
        tracing::warn!(guild_id = guild.id.get(), "No writable channel for welcome message");
        return;
    };

    let message = serenity::CreateMessage::new().embed(embeds::welcome_embed(&data.game_name));
    match channel_id.send_message(&ctx.http, message).await {
        Ok(_) => tracing::info!(guild_id = guild.id.get(), channel_id = channel_id.get(), "Welcome message sent"),
        Err(e) => tracing::error!(guild_id = guild.id.get(), error = %e, "Error sending welcome message"),
    }
}

async fn handle_guild_leave(ctx: &serenity::Context, data: &Data, guild_id: serenity::GuildId) {
    tracing::info!(guild_id = guild_id.get(), "Left guild");
    data.health.set_server_count(ctx.cache.guild_count());

    data.scheduler.unschedule(guild_id.get()).await;
    if let Err(e) = data.configs.remove(guild_id.get()).await {
        tracing::warn!(guild_id = guild_id.get(), error = %e, "Configuration for departed guild not removed");
    }
}
