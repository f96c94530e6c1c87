// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "guild_config/mod.rs"]
pub mod guild_config;

#[path = "reddit/reddit_client.rs"]
pub mod reddit;

#[path = "social_message/mod.rs"]
pub mod social_message;

#[path = "health/mod.rs"]
pub mod health;
