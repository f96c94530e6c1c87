pub mod emoji_phases;
pub mod emoji_pools;
pub mod emoji_service;

pub use emoji_phases::Phase;
pub use emoji_service::{fit_title, EmojiSelector};
