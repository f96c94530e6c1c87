pub mod content_models;
pub mod content_provider;

pub use content_models::{ContentSettings, RawPost, RedditCredentials, TopPost};
pub use content_provider::{ContentError, ContentProvider, RedditApi};
