pub const COLOR_DEFAULT: u32 = 0x5294E2;
pub const COLOR_URGENT: u32 = 0xF68B3E;
pub const COLOR_LAUNCH: u32 = 0xDC322F;
pub const COLOR_ERROR: u32 = 0xFF0000;

pub const DESCRIPTION_LIMIT: usize = 4096;
pub const FIELD_VALUE_LIMIT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Platform-neutral countdown payload. The Discord layer turns it into an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownMessage {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub thumbnail_url: Option<String>,
    pub image_url: Option<String>,
    pub footer: Option<String>,
    pub fields: Vec<EmbedField>,
}

impl CountdownMessage {
    /// Sent in place of a message that could not be built.
    pub fn fallback() -> Self {
        Self {
            title: "**ERROR** - Countdown message failed".to_string(),
            description: "Unable to create countdown message. Please try again.".to_string(),
            color: COLOR_ERROR,
            thumbnail_url: None,
            image_url: None,
            footer: None,
            fields: Vec::new(),
        }
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn clamp_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clamped: String = text.chars().take(max.saturating_sub(1)).collect();
    clamped.push('…');
    clamped
}
