use crate::core::guild_config::{GuildConfigStore, ServerConfig, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;

/// Volatile config store. Nothing touches the disk.
#[derive(Default)]
pub struct InMemoryGuildConfigStore {
    configs: DashMap<u64, ServerConfig>,
}

impl InMemoryGuildConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuildConfigStore for InMemoryGuildConfigStore {
    async fn get(&self, guild_id: u64) -> Result<Option<ServerConfig>, StoreError> {
        Ok(self.configs.get(&guild_id).map(|entry| entry.clone()))
    }

    async fn save(&self, guild_id: u64, config: ServerConfig) -> Result<(), StoreError> {
        self.configs.insert(guild_id, config);
        Ok(())
    }

    async fn delete(&self, guild_id: u64) -> Result<bool, StoreError> {
        Ok(self.configs.remove(&guild_id).is_some())
    }

    async fn delete_many(&self, guild_ids: &[u64]) -> Result<usize, StoreError> {
        Ok(guild_ids
            .iter()
            .filter(|guild_id| self.configs.remove(*guild_id).is_some())
            .count())
    }

    async fn all(&self) -> Result<HashMap<u64, ServerConfig>, StoreError> {
        Ok(self
            .configs
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect())
    }
}
