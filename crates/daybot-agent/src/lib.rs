//! Daybot agent — the model ↔ tool-calling core.
//!
//! This crate contains:
//! - **schema**: the two-key JSON reply contract and its strict parser
//! - **tools**: Tool trait, registry, and the built-in day-planner tools
//! - **prompt**: system prompt construction (identity, contract, catalog)
//! - **agent_loop**: the bounded prompt → parse → dispatch cycle

pub mod agent_loop;
pub mod prompt;
pub mod schema;
pub mod tools;

pub use agent_loop::{AgentLoop, TurnError};
pub use prompt::PromptBuilder;
pub use schema::{parse_agent_response, AgentResponse, ToolCall};
pub use tools::{Tool, ToolRegistry};
