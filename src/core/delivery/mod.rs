pub mod delivery_models;
pub mod delivery_pipeline;

pub use delivery_models::{AdminNotice, ChatError, ResolvedChannel};
pub use delivery_pipeline::{ChatGateway, DeliveryPipeline, DeliverySettings};
