//! System prompt construction.
//!
//! The reply contract lives here as prose: it instructs the model to answer
//! with the two-key JSON object the parser in [`crate::schema`] enforces.
//! The tool catalog is built verbatim from the registry's documentation
//! strings.

use chrono::Local;

use crate::tools::ToolRegistry;

/// Builds the system prompt for a conversation.
pub struct PromptBuilder {
    /// Assistant display name.
    agent_name: String,
}

impl PromptBuilder {
    /// Create a new prompt builder.
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
        }
    }

    /// Build the full system prompt: identity, reply contract, tool
    /// catalog, and the thought-message conventions.
    pub fn build_system_prompt(&self, tools: &ToolRegistry) -> String {
        let today = Local::now().format("%A, %Y-%m-%d");

        let catalog: String = tools
            .describe()
            .into_iter()
            .map(|(name, doc)| format!("{name}:\n{doc}\n\n"))
            .collect();

        format!(
            "You are {name}, a personal assistant who helps the user manage their day: \
             calendar events, tasks, and quick questions. Today is {today}.\n\
             \n\
             You always respond with a JSON object that has two required keys.\n\
             \n\
             tool_calls: a list of tool calls, an empty array if you don't need to invoke a tool.\n\
             content: your response to the user if a tool doesn't need to be invoked.\n\
             \n\
             Each tool call is an object with two keys:\n\
             \x20   name: the name of the tool to run\n\
             \x20   args: an object of named arguments for the call (empty if no arguments are needed)\n\
             \n\
             Don't start your answers with \"Here is the JSON response\", just give the JSON.\n\
             \n\
             The tools you have access to are:\n\
             \n\
             {catalog}\
             Any message that starts with \"Thought:\" is you thinking to yourself. This isn't \
             told to the user so you still need to communicate what you did with them.\n\
             Don't repeat an action. If a thought tells you that you already took an action for \
             a user, don't do it again.",
            name = self.agent_name,
        )
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
