// Environment-driven settings.
//
// Everything except the Discord token has a default, so the bot runs with a
// bare `.env` holding only `DISCORD_TOKEN`. Optional values that fail to parse
// are logged and replaced by their default. The release date and the default
// post time are the exception: a bad value there refuses startup.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::core::content::RedditCredentials;
use crate::core::time::{parse_time, TimeFormatError};

pub const DEFAULT_RELEASE_DATE: &str = "2025-10-30T00:00:00Z";
pub const DEFAULT_SOCIAL_MESSAGE_FILE: &str = "next-message.txt";
const TOKEN_PLACEHOLDER: &str = "your_bot_token_here";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.")]
    MissingToken,
    #[error("DISCORD_TOKEN is still the placeholder value; set your real bot token")]
    PlaceholderToken,
    #[error("RELEASE_DATE {0:?} is not an ISO 8601 date or timestamp")]
    InvalidReleaseDate(String),
    #[error("DEFAULT_POST_TIME is invalid: {0}")]
    InvalidPostTime(#[from] TimeFormatError),
}

#[derive(Clone)]
pub struct BotSettings {
    pub discord_token: String,
    pub release_date: DateTime<Utc>,
    pub game_name: String,
    pub game_studio: String,
    pub thumbnail_url: String,
    pub default_post_time: String,
    pub config_file: PathBuf,
    pub max_config_backups: usize,
    pub social_message_file: PathBuf,
    pub health_port: u16,
    pub http_timeout: Duration,
    pub discord_retry_attempts: u32,
    pub reddit_retry_attempts: u32,
    pub reddit_credentials: Option<RedditCredentials>,
    pub reddit_subreddit: String,
    pub reddit_min_title_length: usize,
}

impl fmt::Debug for BotSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotSettings")
            .field("discord_token", &"[redacted]")
            .field("release_date", &self.release_date)
            .field("game_name", &self.game_name)
            .field("default_post_time", &self.default_post_time)
            .field("config_file", &self.config_file)
            .field("social_message_file", &self.social_message_file)
            .field("health_port", &self.health_port)
            .field("http_timeout", &self.http_timeout)
            .field("reddit_credentials", &self.reddit_credentials)
            .field("reddit_subreddit", &self.reddit_subreddit)
            .finish_non_exhaustive()
    }
}

impl BotSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Where the one-shot social message lives. Needs no token, so the
    /// `queue-message` command can run without the rest of the settings.
    pub fn social_message_file_from_env() -> PathBuf {
        std::env::var("SOCIAL_MESSAGE_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOCIAL_MESSAGE_FILE))
    }

    /// Build settings from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let text = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::MissingToken)?;
        if discord_token.trim() == TOKEN_PLACEHOLDER {
            return Err(ConfigError::PlaceholderToken);
        }

        let raw_release = text("RELEASE_DATE", DEFAULT_RELEASE_DATE);
        let release_date = parse_release_date(&raw_release)
            .ok_or_else(|| ConfigError::InvalidReleaseDate(raw_release.clone()))?;

        let default_post_time = text("DEFAULT_POST_TIME", "12:00");
        parse_time(&default_post_time)?;

        let reddit_credentials = match (
            get("REDDIT_CLIENT_ID"),
            get("REDDIT_CLIENT_SECRET"),
            get("REDDIT_USERNAME"),
            get("REDDIT_PASSWORD"),
        ) {
            (Some(client_id), Some(client_secret), Some(username), Some(password)) => {
                Some(RedditCredentials {
                    client_id,
                    client_secret,
                    username,
                    password,
                })
            }
            _ => None,
        };

        Ok(Self {
            discord_token,
            release_date,
            game_name: text("GAME_NAME", "Arc Raiders"),
            game_studio: text("GAME_STUDIO", "Embark Studios"),
            thumbnail_url: text(
                "GAME_THUMBNAIL_URL",
                "https://cdn.akamai.steamstatic.com/steam/apps/2389730/header.jpg",
            ),
            default_post_time,
            config_file: PathBuf::from(text("CONFIG_FILE", "server-config.json")),
            max_config_backups: parsed(&get, "MAX_CONFIG_BACKUPS", 5),
            social_message_file: PathBuf::from(text("SOCIAL_MESSAGE_FILE", DEFAULT_SOCIAL_MESSAGE_FILE)),
            health_port: parsed(&get, "HEALTH_PORT", 3000),
            http_timeout: Duration::from_secs(parsed(&get, "HTTP_TIMEOUT_SECS", 10)),
            discord_retry_attempts: parsed(&get, "DISCORD_RETRY_ATTEMPTS", 3),
            reddit_retry_attempts: parsed(&get, "REDDIT_RETRY_ATTEMPTS", 3),
            reddit_credentials,
            reddit_subreddit: text("REDDIT_SUBREDDIT", "arcraiders"),
            reddit_min_title_length: parsed(&get, "REDDIT_MIN_TITLE_LENGTH", 10),
        })
    }
}

/// RFC 3339 with an offset, or a bare date / date-time read as UTC.
fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parsed<T, G>(get: &G, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "Invalid value, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<BotSettings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn token_alone_is_enough() {
        let s = settings(&[("DISCORD_TOKEN", "abc")]).unwrap();
        assert_eq!(s.release_date.to_rfc3339(), "2025-10-30T00:00:00+00:00");
        assert_eq!(s.default_post_time, "12:00");
        assert_eq!(s.config_file, PathBuf::from("server-config.json"));
        assert_eq!(s.max_config_backups, 5);
        assert_eq!(s.health_port, 3000);
        assert_eq!(s.http_timeout, Duration::from_secs(10));
        assert_eq!(s.reddit_subreddit, "arcraiders");
        assert!(s.reddit_credentials.is_none());
    }

    #[test]
    fn missing_or_placeholder_token_is_fatal() {
        assert!(matches!(settings(&[]), Err(ConfigError::MissingToken)));
        assert!(matches!(
            settings(&[("DISCORD_TOKEN", "  ")]),
            Err(ConfigError::MissingToken)
        ));
        assert!(matches!(
            settings(&[("DISCORD_TOKEN", "your_bot_token_here")]),
            Err(ConfigError::PlaceholderToken)
        ));
    }

    #[test]
    fn bad_release_date_or_post_time_is_fatal() {
        assert!(matches!(
            settings(&[("DISCORD_TOKEN", "abc"), ("RELEASE_DATE", "next thursday")]),
            Err(ConfigError::InvalidReleaseDate(_))
        ));
        assert!(matches!(
            settings(&[("DISCORD_TOKEN", "abc"), ("DEFAULT_POST_TIME", "noonish")]),
            Err(ConfigError::InvalidPostTime(_))
        ));
    }

    #[test]
    fn release_date_accepts_iso_dates_without_offset() {
        for raw in [
            "2025-10-30",
            "2025-10-30T00:00:00",
            "2025-10-30T00:00:00Z",
            "2025-10-30T02:00:00+02:00",
        ] {
            let s = settings(&[("DISCORD_TOKEN", "abc"), ("RELEASE_DATE", raw)]).unwrap();
            assert_eq!(s.release_date.to_rfc3339(), "2025-10-30T00:00:00+00:00", "{raw}");
        }

        let s = settings(&[("DISCORD_TOKEN", "abc"), ("RELEASE_DATE", "2025-10-30T18:30:00")])
            .unwrap();
        assert_eq!(s.release_date.to_rfc3339(), "2025-10-30T18:30:00+00:00");

        assert!(matches!(
            settings(&[("DISCORD_TOKEN", "abc"), ("RELEASE_DATE", "2025-13-40")]),
            Err(ConfigError::InvalidReleaseDate(_))
        ));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let s = settings(&[
            ("DISCORD_TOKEN", "very-secret-token"),
            ("REDDIT_CLIENT_ID", "id"),
            ("REDDIT_CLIENT_SECRET", "shh-secret"),
            ("REDDIT_USERNAME", "user"),
            ("REDDIT_PASSWORD", "hunter2"),
        ])
        .unwrap();

        let printed = format!("{s:?}");
        assert!(!printed.contains("very-secret-token"));
        assert!(!printed.contains("shh-secret"));
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("[redacted]"));
        assert!(printed.contains("user"));
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let s = settings(&[
            ("DISCORD_TOKEN", "abc"),
            ("HEALTH_PORT", "not-a-port"),
            ("DISCORD_RETRY_ATTEMPTS", "5"),
        ])
        .unwrap();
        assert_eq!(s.health_port, 3000);
        assert_eq!(s.discord_retry_attempts, 5);
    }

    #[test]
    fn reddit_needs_all_four_credentials() {
        let partial = settings(&[
            ("DISCORD_TOKEN", "abc"),
            ("REDDIT_CLIENT_ID", "id"),
            ("REDDIT_CLIENT_SECRET", "secret"),
        ])
        .unwrap();
        assert!(partial.reddit_credentials.is_none());

        let full = settings(&[
            ("DISCORD_TOKEN", "abc"),
            ("REDDIT_CLIENT_ID", "id"),
            ("REDDIT_CLIENT_SECRET", "secret"),
            ("REDDIT_USERNAME", "user"),
            ("REDDIT_PASSWORD", "pass"),
        ])
        .unwrap();
        assert_eq!(full.reddit_credentials.unwrap().username, "user");
    }
}
