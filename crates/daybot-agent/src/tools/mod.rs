//! Agent tools: the trait, the registry, and the built-in tool set.

pub mod agenda;
pub mod base;
pub mod clock;
pub mod echo;
pub mod registry;

pub use agenda::{
    AddEventTool, AddTaskTool, AgendaStore, CompleteTaskTool, ListEventsTool, ListTasksTool,
};
pub use base::Tool;
pub use clock::ClockTool;
pub use echo::EchoTool;
pub use registry::ToolRegistry;
