use crate::core::guild_config::{GuildConfigStore, ServerConfig, StoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

/// On-disk shape: `{ "servers": { "<guild id>": { ...ServerConfig } } }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    servers: BTreeMap<u64, ServerConfig>,
}

/// JSON file store with atomic writes and rotating backups.
///
/// Every write copies the current file to `<stem>-backup-<epochMillis>.json`,
/// keeps the newest `max_backups` of those, then writes the new document to a
/// temp file and renames it over the original.
pub struct JsonGuildConfigStore {
    path: PathBuf,
    max_backups: usize,
    cache: RwLock<ConfigDocument>,
}

impl JsonGuildConfigStore {
    pub fn new(path: impl Into<PathBuf>, max_backups: usize) -> Self {
        let path = path.into();
        let document = load_document(&path);

        Self {
            path,
            max_backups,
            cache: RwLock::new(document),
        }
    }

    fn persist(&self, document: &ConfigDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        if self.path.exists() {
            if let Err(e) = self.create_backup() {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to create configuration backup");
            }
        }

        let text = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply `change` to a copy of the document and write it. The cache only
    /// takes the new document once the file does; a failed write leaves both
    /// as they were. `change` returns false when there is nothing to write.
    async fn commit<F>(&self, change: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut ConfigDocument) -> bool,
    {
        // Hold the write lock across the file write so saves never interleave.
        let mut cache = self.cache.write().await;
        let mut next = cache.clone();
        if !change(&mut next) {
            return Ok(false);
        }
        self.persist(&next)?;
        *cache = next;
        Ok(true)
    }

    fn backup_prefix(&self) -> String {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "server-config".to_string());
        format!("{stem}-backup-")
    }

    fn backup_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn create_backup(&self) -> std::io::Result<()> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let backup = self
            .backup_dir()
            .join(format!("{}{}.json", self.backup_prefix(), millis));

        fs::copy(&self.path, &backup)?;
        tracing::debug!(backup = %backup.display(), "Configuration backup created");

        self.rotate_backups()
    }

    fn rotate_backups(&self) -> std::io::Result<()> {
        let prefix = self.backup_prefix();
        let mut backups: Vec<(u128, PathBuf)> = fs::read_dir(self.backup_dir())?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let millis = name
                    .strip_prefix(&prefix)?
                    .strip_suffix(".json")?
                    .parse::<u128>()
                    .ok()?;
                Some((millis, entry.path()))
            })
            .collect();

        // newest first
        backups.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, stale) in backups.into_iter().skip(self.max_backups) {
            fs::remove_file(&stale)?;
            tracing::debug!(backup = %stale.display(), "Deleted old configuration backup");
        }
        Ok(())
    }
}

fn load_document(path: &Path) -> ConfigDocument {
    if !path.exists() {
        return ConfigDocument::default();
    }

    let parsed = fs::read_to_string(path)
        .map_err(StoreError::from)
        .and_then(|text| serde_json::from_str(&text).map_err(StoreError::from));

    parsed.unwrap_or_else(|e| {
        tracing::error!(path = %path.display(), error = %e, "Error loading server configs, starting empty");
        ConfigDocument::default()
    })
}

#[async_trait]
impl GuildConfigStore for JsonGuildConfigStore {
    async fn get(&self, guild_id: u64) -> Result<Option<ServerConfig>, StoreError> {
        let cache = self.cache.read().await;
        Ok(cache.servers.get(&guild_id).cloned())
    }

    async fn save(&self, guild_id: u64, config: ServerConfig) -> Result<(), StoreError> {
        self.commit(|document| {
            document.servers.insert(guild_id, config);
            true
        })
        .await
        .map(|_| ())
    }

    async fn delete(&self, guild_id: u64) -> Result<bool, StoreError> {
        self.commit(|document| document.servers.remove(&guild_id).is_some())
            .await
    }

    async fn delete_many(&self, guild_ids: &[u64]) -> Result<usize, StoreError> {
        let mut removed = 0;
        self.commit(|document| {
            removed = guild_ids
                .iter()
                .filter(|guild_id| document.servers.remove(*guild_id).is_some())
                .count();
            removed > 0
        })
        .await?;
        Ok(removed)
    }

    async fn all(&self) -> Result<HashMap<u64, ServerConfig>, StoreError> {
        let cache = self.cache.read().await;
        Ok(cache
            .servers
            .iter()
            .map(|(guild_id, config)| (*guild_id, config.clone()))
            .collect())
    }
}
