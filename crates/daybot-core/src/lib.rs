//! Daybot core — message types, the conversation transcript, config, and
//! small utilities shared by every other crate.

pub mod config;
pub mod transcript;
pub mod types;
pub mod utils;

pub use transcript::Transcript;
pub use types::{Message, Role, THOUGHT_PREFIX};
