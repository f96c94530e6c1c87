// This is the entry point of the countdown bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (files, Reddit, health server)
// - `discord/` = Discord-specific adapters (commands, events, gateway)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Stop the scheduled jobs and the shards on SIGINT/SIGTERM

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "config/bot_settings.rs"]
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use poise::serenity_prelude as serenity;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::config::BotSettings;
use crate::core::content::{ContentProvider, ContentSettings};
use crate::core::delivery::{DeliveryPipeline, DeliverySettings};
use crate::core::guild_config::GuildConfigService;
use crate::core::health::HealthState;
use crate::core::message::{CountdownSettings, MessageComposer, SocialMessageQueue};
use crate::core::retry::RetryPolicy;
use crate::core::scheduler::CountdownScheduler;
use crate::discord::events;
use crate::discord::gateway::SerenityGateway;
use crate::discord::Data;
use crate::infra::guild_config::JsonGuildConfigStore;
use crate::infra::reddit::RedditHttpClient;
use crate::infra::social_message::FileSocialMessageQueue;

#[derive(Parser)]
#[command(name = "countdown-bot", version, about = "Daily release countdown for Discord")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Queue a one-off line for the next countdown message, then exit
    QueueMessage {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Some(Command::QueueMessage { text }) => queue_message(&text.join(" ")).await,
        None => run_bot(BotSettings::from_env()?).await,
    }
}

async fn queue_message(text: &str) -> anyhow::Result<()> {
    let path = BotSettings::social_message_file_from_env();
    FileSocialMessageQueue::new(&path).push(text).await?;
    tracing::info!(path = %path.display(), "Message queued for the next countdown post");
    Ok(())
}

async fn run_bot(settings: BotSettings) -> anyhow::Result<()> {
    tracing::info!(
        game = %settings.game_name,
        release_date = %settings.release_date,
        "Starting countdown bot"
    );

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let health = Arc::new(HealthState::new());
    let health_port = settings.health_port;
    let health_state = Arc::clone(&health);
    tokio::spawn(async move {
        if let Err(e) = infra::health::serve(health_port, health_state).await {
            tracing::error!(port = health_port, error = %e, "Health check server stopped");
        }
    });

    let config_store = JsonGuildConfigStore::new(&settings.config_file, settings.max_config_backups);
    let configs = Arc::new(GuildConfigService::new(
        config_store,
        settings.default_post_time.clone(),
    ));

    let content = Arc::new(ContentProvider::new(
        RedditHttpClient::new(settings.http_timeout)?,
        settings.reddit_credentials.clone(),
        ContentSettings {
            subreddit: settings.reddit_subreddit.clone(),
            min_title_length: settings.reddit_min_title_length,
            retry: RetryPolicy::exponential(settings.reddit_retry_attempts),
        },
    ));
    if !content.is_configured() {
        tracing::info!("Reddit credentials not set, countdown posts go out without community content");
    }

    let social: Arc<dyn SocialMessageQueue> =
        Arc::new(FileSocialMessageQueue::new(&settings.social_message_file));
    let composer = MessageComposer::new(
        Arc::clone(&content),
        social,
        CountdownSettings {
            game_name: settings.game_name.clone(),
            studio: settings.game_studio.clone(),
            thumbnail_url: settings.thumbnail_url.clone(),
        },
    );

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILDS;
    let delivery_settings = DeliverySettings {
        release_date: settings.release_date,
        retry: RetryPolicy::exponential(settings.discord_retry_attempts),
    };
    let http_timeout = settings.http_timeout;
    let game_name = settings.game_name.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::all(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(discord::commands::countdown::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!("Commands registered");

                // The gateway needs the client's HTTP handle and cache, which
                // only exist from here on.
                let gateway = SerenityGateway::new(ctx.http.clone(), ctx.cache.clone(), http_timeout);
                let release_date = delivery_settings.release_date;
                let delivery = Arc::new(DeliveryPipeline::new(
                    gateway,
                    Arc::clone(&configs),
                    composer,
                    delivery_settings,
                ));
                let scheduler = Arc::new(CountdownScheduler::new(delivery.clone()).await?);

                let shard_manager = framework.shard_manager().clone();
                let shutdown_scheduler = Arc::clone(&scheduler);
                tokio::spawn(async move {
                    shutdown_signal().await;
                    tracing::info!("Shutting down gracefully...");
                    shutdown_scheduler.stop_all().await;
                    shard_manager.shutdown_all().await;
                });

                let data = Data {
                    game_name,
                    release_date,
                    configs,
                    content,
                    delivery,
                    scheduler,
                    health,
                };
                events::on_ready(ctx, ready, &data).await;
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    tracing::info!("Client stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
