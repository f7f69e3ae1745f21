//! Tool Registry — the named-tool store the agent loop dispatches through.
//!
//! Registration order is preserved because `describe()` feeds the system
//! prompt's catalog; lookups are case-insensitive because model output is
//! not trusted to keep casing straight.

use std::sync::Arc;

use tracing::info;

use super::base::Tool;

// ─────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────

/// Stores tools in registration order and resolves calls by name.
///
/// Owns `Arc<dyn Tool>` so tools can be shared across threads. Registering
/// a name twice silently replaces the earlier tool in place (last
/// registration wins).
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Overwrites any previous tool with the same
    /// (case-folded) name, keeping its position in the catalog.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let key = tool.name().to_lowercase();
        info!(tool = %key, "registered tool");
        match self
            .tools
            .iter_mut()
            .find(|t| t.name().to_lowercase() == key)
        {
            Some(slot) => *slot = tool,
            None => self.tools.push(tool),
        }
    }

    /// Look up a tool by name, case-insensitively.
    pub fn resolve(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        let key = name.to_lowercase();
        self.tools.iter().find(|t| t.name().to_lowercase() == key)
    }

    /// Check if a tool is registered.
    pub fn has(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// `(name, documentation)` pairs in registration order, used verbatim
    /// to build the system prompt's tool catalog.
    pub fn describe(&self) -> Vec<(String, String)> {
        self.tools
            .iter()
            .map(|t| (t.name().to_string(), t.description().to_string()))
            .collect()
    }

    /// Names of all registered tools, in catalog order.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
