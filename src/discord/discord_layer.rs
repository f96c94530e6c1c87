// Discord layer - commands, event handlers and the serenity adapters.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "embeds/countdown_embeds.rs"]
pub mod embeds;

#[path = "events/guild_events.rs"]
pub mod events;

#[path = "gateway/serenity_gateway.rs"]
pub mod gateway;

// Re-export command types for convenience
pub use commands::countdown::{Data, Error};
