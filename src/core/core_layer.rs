// The core module contains all business logic.
// Each feature gets its own submodule; nothing here knows about Discord.

#[path = "time/time_conversion.rs"]
pub mod time;

#[path = "retry/retry_executor.rs"]
pub mod retry;

#[path = "guild_config/mod.rs"]
pub mod guild_config;

#[path = "emoji/mod.rs"]
pub mod emoji;

#[path = "content/mod.rs"]
pub mod content;

#[path = "message/mod.rs"]
pub mod message;

#[path = "scheduler/countdown_scheduler.rs"]
pub mod scheduler;

#[path = "delivery/mod.rs"]
pub mod delivery;

#[path = "health/health_state.rs"]
pub mod health;
