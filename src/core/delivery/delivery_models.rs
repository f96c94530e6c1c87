use thiserror::Error;

/// Discord JSON error codes we act on.
pub const CODE_MISSING_ACCESS: i64 = 50001;
pub const CODE_MISSING_PERMISSIONS: i64 = 50013;
pub const CODE_UNKNOWN_CHANNEL: i64 = 10003;
pub const CODE_UNKNOWN_GUILD: i64 = 10004;

/// A failed call to the chat platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Rate limited")]
    RateLimited,
    #[error("Missing Permissions")]
    MissingPermissions,
    #[error("Missing Access")]
    MissingAccess,
    #[error("Unknown Channel: channel not found")]
    UnknownChannel,
    #[error("Unknown Guild: server not found")]
    UnknownGuild,
    #[error("Request timed out")]
    Timeout,
    #[error("Discord API error (HTTP {status}, code {code:?}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },
}

impl ChatError {
    /// Classify an unsuccessful API response.
    pub fn from_response(status: u16, code: Option<i64>, message: impl Into<String>) -> Self {
        match (status, code) {
            (429, _) => ChatError::RateLimited,
            (_, Some(CODE_MISSING_PERMISSIONS)) => ChatError::MissingPermissions,
            (_, Some(CODE_MISSING_ACCESS)) => ChatError::MissingAccess,
            (_, Some(CODE_UNKNOWN_CHANNEL)) => ChatError::UnknownChannel,
            (_, Some(CODE_UNKNOWN_GUILD)) => ChatError::UnknownGuild,
            _ => ChatError::Api {
                status,
                code,
                message: message.into(),
            },
        }
    }

    /// Rate limits and permission-check races clear up on their own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ChatError::RateLimited | ChatError::MissingPermissions | ChatError::Timeout
        )
    }

    /// The bot can no longer reach the target at all.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ChatError::MissingAccess | ChatError::UnknownChannel | ChatError::UnknownGuild
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("No channel configured")]
    NotConfigured,
    #[error("Channel with ID {channel_id} not found or bot doesn't have access")]
    ChannelUnavailable { channel_id: u64 },
    #[error("Bot doesn't have permission to send messages in channel {channel_id}")]
    PermissionDenied { channel_id: u64 },
    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl DeliveryError {
    /// Whether the guild's configuration should be dropped.
    pub fn is_permanent(&self) -> bool {
        match self {
            DeliveryError::ChannelUnavailable { .. } => true,
            DeliveryError::Chat(e) => e.is_permanent(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    pub channel_id: u64,
    pub name: String,
    /// Bot may send messages and embed links here.
    pub can_send: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    NotConfigured,
    CountdownOver,
    Delivered { days_remaining: i64 },
    Failed { evicted: bool },
}

/// Diagnostic posted to a guild when its countdown could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminNotice {
    pub title: String,
    pub description: String,
    pub footer: String,
    pub color: u32,
}

impl AdminNotice {
    pub fn delivery_failure(game_name: &str, error: &str) -> Self {
        Self {
            title: format!("⚠️ {game_name} Countdown Bot - Configuration Issue"),
            description: format!(
                "I'm having trouble posting countdown messages in the configured channel.\n\n\
                 **Error:** {error}\n\n\
                 **Solutions:**\n\
                 • Check if I have permission to send messages in the channel\n\
                 • Verify the channel still exists\n\
                 • Re-run `/countdown-setup` to reconfigure\n\
                 • Make sure I haven't been removed from the server"
            ),
            footer: "This message will stop appearing once the issue is resolved".to_string(),
            color: 0xFF6B6B,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_discord_error_codes() {
        assert_eq!(ChatError::from_response(429, None, ""), ChatError::RateLimited);
        assert_eq!(
            ChatError::from_response(403, Some(50013), "Missing Permissions"),
            ChatError::MissingPermissions
        );
        assert_eq!(
            ChatError::from_response(403, Some(50001), "Missing Access"),
            ChatError::MissingAccess
        );
        assert_eq!(
            ChatError::from_response(404, Some(10003), "Unknown Channel"),
            ChatError::UnknownChannel
        );
        assert!(matches!(
            ChatError::from_response(500, None, "oops"),
            ChatError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn retryable_and_permanent_are_disjoint() {
        let all = [
            ChatError::RateLimited,
            ChatError::MissingPermissions,
            ChatError::MissingAccess,
            ChatError::UnknownChannel,
            ChatError::UnknownGuild,
            ChatError::Timeout,
            ChatError::from_response(500, None, "oops"),
        ];
        for e in all {
            assert!(!(e.is_retryable() && e.is_permanent()), "{e:?}");
        }
    }

    #[test]
    fn only_lost_access_is_permanent() {
        assert!(DeliveryError::ChannelUnavailable { channel_id: 1 }.is_permanent());
        assert!(DeliveryError::Chat(ChatError::MissingAccess).is_permanent());
        assert!(!DeliveryError::PermissionDenied { channel_id: 1 }.is_permanent());
        assert!(!DeliveryError::Chat(ChatError::RateLimited).is_permanent());
    }

    #[test]
    fn notice_names_the_error_and_the_fixes() {
        let notice = AdminNotice::delivery_failure("Arc Raiders", "Missing Access");
        assert_eq!(notice.title, "⚠️ Arc Raiders Countdown Bot - Configuration Issue");
        assert!(notice.description.contains("**Error:** Missing Access"));
        assert!(notice.description.contains("/countdown-setup"));
    }
}
