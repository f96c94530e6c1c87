use super::guild_config_models::ServerConfig;
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Keyed persistence for guild configuration.
///
/// Implementations persist synchronously inside `save`/`delete`; callers treat a
/// returned `Ok` as "on disk".
#[async_trait]
pub trait GuildConfigStore: Send + Sync {
    async fn get(&self, guild_id: u64) -> Result<Option<ServerConfig>, StoreError>;
    async fn save(&self, guild_id: u64, config: ServerConfig) -> Result<(), StoreError>;
    /// Returns whether an entry was removed.
    async fn delete(&self, guild_id: u64) -> Result<bool, StoreError>;
    /// Remove several entries with a single write. Returns how many existed.
    async fn delete_many(&self, guild_ids: &[u64]) -> Result<usize, StoreError>;
    async fn all(&self) -> Result<HashMap<u64, ServerConfig>, StoreError>;
}
