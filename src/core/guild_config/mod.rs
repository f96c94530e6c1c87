pub mod guild_config_models;
pub mod guild_config_service;
pub mod guild_config_store;

pub use guild_config_models::{ServerConfig, ServerConfigUpdate, DEFAULT_POST_TIME};
pub use guild_config_service::GuildConfigService;
pub use guild_config_store::{GuildConfigStore, StoreError};
