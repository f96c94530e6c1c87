// Guild configuration persistence.
// - `json_store.rs` is what the bot runs on: one JSON file plus rotating backups.
// - `in_memory.rs` backs the tests of everything that needs a config store.

#[cfg(test)]
pub mod in_memory;
pub mod json_store;

#[cfg(test)]
pub use in_memory::InMemoryGuildConfigStore;
pub use json_store::JsonGuildConfigStore;
