//! Model client layer for Daybot.
//!
//! # Architecture
//!
//! - [`traits::ChatClient`] — the boundary the agent loop talks to
//! - [`http_client::HttpChatClient`] — generic OpenAI-compatible HTTP client
//!
//! The client is an explicitly constructed, explicitly lifetimed dependency:
//! the CLI builds one from config and hands it to the agent loop. Nothing
//! here is process-global.

pub mod http_client;
pub mod traits;

// Re-export main types for convenience
pub use http_client::HttpChatClient;
pub use traits::{ChatClient, ChatError, RequestOptions};
