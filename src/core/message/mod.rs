pub mod message_composer;
pub mod message_models;
pub mod social_message_queue;

pub use message_composer::{CountdownSettings, MessageComposer};
pub use message_models::CountdownMessage;
pub use social_message_queue::{QueueError, SocialMessageQueue};
