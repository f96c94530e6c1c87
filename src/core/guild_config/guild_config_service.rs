use std::collections::{HashMap, HashSet};

use super::guild_config_models::{ConfigStats, ServerConfig, ServerConfigUpdate};
use super::guild_config_store::{GuildConfigStore, StoreError};

/// Guild configuration with the bot's read/write policy on top of a store.
///
/// Reads never fail: a broken store is logged and looks empty. Writes are
/// attempted once; a failure is logged and returned, never retried.
pub struct GuildConfigService<S: GuildConfigStore> {
    store: S,
    default_post_time: String,
}

impl<S: GuildConfigStore> GuildConfigService<S> {
    pub fn new(store: S, default_post_time: impl Into<String>) -> Self {
        Self {
            store,
            default_post_time: default_post_time.into(),
        }
    }

    pub fn default_post_time(&self) -> &str {
        &self.default_post_time
    }

    /// Configuration for a guild, or the unconfigured defaults.
    pub async fn get(&self, guild_id: u64) -> ServerConfig {
        match self.store.get(guild_id).await {
            Ok(Some(config)) => config,
            Ok(None) => ServerConfig::unconfigured(&self.default_post_time),
            Err(e) => {
                tracing::error!(guild_id, error = %e, "Failed to read server config, using defaults");
                ServerConfig::unconfigured(&self.default_post_time)
            }
        }
    }

    pub async fn update(
        &self,
        guild_id: u64,
        update: ServerConfigUpdate,
    ) -> Result<ServerConfig, StoreError> {
        let mut config = self.get(guild_id).await;
        config.merge(update);

        if let Err(e) = self.store.save(guild_id, config.clone()).await {
            tracing::error!(guild_id, error = %e, "Failed to save server config");
            return Err(e);
        }

        tracing::info!(
            guild_id,
            channel_id = ?config.channel_id,
            post_time = %config.post_time,
            "Server configuration updated"
        );
        Ok(config)
    }

    /// Forget a guild entirely. Unknown guilds are a no-op.
    pub async fn remove(&self, guild_id: u64) -> Result<(), StoreError> {
        match self.store.delete(guild_id).await {
            Ok(true) => {
                tracing::info!(guild_id, "Server configuration removed");
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(e) => {
                tracing::error!(guild_id, error = %e, "Failed to remove server config");
                Err(e)
            }
        }
    }

    pub async fn all(&self) -> HashMap<u64, ServerConfig> {
        self.store.all().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to load server configs");
            HashMap::new()
        })
    }

    pub async fn configured_guilds(&self) -> Vec<u64> {
        let mut guilds: Vec<u64> = self
            .all()
            .await
            .into_iter()
            .filter(|(_, config)| config.is_configured())
            .map(|(guild_id, _)| guild_id)
            .collect();
        guilds.sort_unstable();
        guilds
    }

    pub async fn stats(&self) -> ConfigStats {
        let all = self.all().await;
        ConfigStats {
            total_servers: all.len(),
            configured_servers: all.values().filter(|c| c.is_configured()).count(),
        }
    }

    /// Drop every stored guild the bot is no longer a member of.
    pub async fn cleanup_orphans(&self, live_guild_ids: &HashSet<u64>) -> usize {
        let orphans: Vec<u64> = self
            .all()
            .await
            .into_keys()
            .filter(|guild_id| !live_guild_ids.contains(guild_id))
            .collect();

        if orphans.is_empty() {
            return 0;
        }

        for guild_id in &orphans {
            tracing::info!(guild_id, "Removing orphaned configuration (bot no longer in server)");
        }

        match self.store.delete_many(&orphans).await {
            Ok(removed) => {
                tracing::info!(removed, "Cleaned up orphaned server configurations");
                removed
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to clean up orphaned server configurations");
                0
            }
        }
    }
}
