use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_POST_TIME: &str = "12:00";

/// Per-guild countdown configuration as persisted in `server-config.json`.
///
/// A guild without a `channel_id` is known but not configured, and must never
/// have a scheduled job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, with = "snowflake")]
    pub channel_id: Option<u64>,
    /// Display name captured at setup time. Advisory only.
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default = "default_post_time")]
    pub post_time: String,
}

impl ServerConfig {
    pub fn unconfigured(default_post_time: &str) -> Self {
        Self {
            channel_id: None,
            channel_name: None,
            post_time: default_post_time.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.channel_id.is_some()
    }

    /// Apply a partial update, leaving untouched fields as they were.
    pub fn merge(&mut self, update: ServerConfigUpdate) {
        if let Some(channel_id) = update.channel_id {
            self.channel_id = Some(channel_id);
        }
        if let Some(channel_name) = update.channel_name {
            self.channel_name = Some(channel_name);
        }
        if let Some(post_time) = update.post_time {
            self.post_time = post_time;
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::unconfigured(DEFAULT_POST_TIME)
    }
}

/// Fields to change on a guild's configuration. `None` means "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfigUpdate {
    pub channel_id: Option<u64>,
    pub channel_name: Option<String>,
    pub post_time: Option<String>,
}

impl ServerConfigUpdate {
    pub fn channel(channel_id: u64, channel_name: impl Into<String>) -> Self {
        Self {
            channel_id: Some(channel_id),
            channel_name: Some(channel_name.into()),
            post_time: None,
        }
    }

    pub fn post_time(post_time: impl Into<String>) -> Self {
        Self {
            post_time: Some(post_time.into()),
            ..Self::default()
        }
    }

    pub fn with_post_time(mut self, post_time: impl Into<String>) -> Self {
        self.post_time = Some(post_time.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigStats {
    pub total_servers: usize,
    pub configured_servers: usize,
}

fn default_post_time() -> String {
    DEFAULT_POST_TIME.to_string()
}

/// Snowflakes are written as strings. Plain numbers are accepted on read.
mod snowflake {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(id) => serializer.serialize_str(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(id)) => Ok(Some(id)),
            Some(Raw::Text(text)) if text.is_empty() => Ok(None),
            Some(Raw::Text(text)) => text
                .parse()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_legacy_string_and_numeric_ids() {
        let from_string: ServerConfig = serde_json::from_str(
            r#"{"channelId":"1413486967525478462","channelName":"general","postTime":"3pm"}"#,
        )
        .unwrap();
        assert_eq!(from_string.channel_id, Some(1413486967525478462));
        assert_eq!(from_string.post_time, "3pm");

        let from_number: ServerConfig =
            serde_json::from_str(r#"{"channelId":42,"channelName":null}"#).unwrap();
        assert_eq!(from_number.channel_id, Some(42));
        assert_eq!(from_number.post_time, DEFAULT_POST_TIME);
    }

    #[test]
    fn writes_ids_as_strings() {
        let config = ServerConfig {
            channel_id: Some(7),
            channel_name: Some("countdown".into()),
            post_time: "09:00".into(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["channelId"], "7");
        assert_eq!(json["postTime"], "09:00");
    }

    #[test]
    fn merge_only_touches_provided_fields() {
        let mut config = ServerConfig::default();
        config.merge(ServerConfigUpdate::channel(5, "general"));
        config.merge(ServerConfigUpdate::post_time("3pm"));

        assert_eq!(config.channel_id, Some(5));
        assert_eq!(config.channel_name.as_deref(), Some("general"));
        assert_eq!(config.post_time, "3pm");
    }
}
