//! Daybot CLI — entry point.
//!
//! # Commands
//!
//! - `daybot chat [-m MESSAGE]` — chat with the assistant (single-shot or REPL)
//! - `daybot onboard` — initialize the config file
//! - `daybot status` — show the effective configuration

mod helpers;
mod onboard;
mod repl;
mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use daybot_agent::tools::{
    AddEventTool, AddTaskTool, AgendaStore, ClockTool, CompleteTaskTool, EchoTool,
    ListEventsTool, ListTasksTool,
};
use daybot_agent::{AgentLoop, PromptBuilder, ToolRegistry};
use daybot_core::config::{load_config, Config};
use daybot_core::transcript::Transcript;
use daybot_core::types::Message;
use daybot_providers::{HttpChatClient, RequestOptions};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🗓 Daybot — a day-planning AI assistant
#[derive(Parser)]
#[command(name = "daybot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Initialize the configuration file
    Onboard,

    /// Show the effective configuration
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { message, logs } => {
            init_logging(logs);
            run_chat(message).await
        }
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(message: Option<String>) -> Result<()> {
    let config = load_config(None);
    let agent = build_agent_loop(&config);
    let system_prompt =
        PromptBuilder::new(config.agent.name.as_str()).build_system_prompt(agent.tools());

    let mut transcript = Transcript::new();
    transcript.append(Message::system(system_prompt.clone()));

    match message {
        Some(msg) => {
            // Single-shot mode
            info!("processing single message");
            let response = agent
                .process(&mut transcript, &msg)
                .await
                .context("agent turn failed")?;
            helpers::print_response(&response);
            Ok(())
        }
        None => {
            // Interactive REPL mode
            repl::run(agent, transcript, &system_prompt).await
        }
    }
}

/// Build an `AgentLoop` from the loaded configuration.
pub fn build_agent_loop(config: &Config) -> AgentLoop {
    let client = Arc::new(HttpChatClient::new(
        config.provider.api_base.as_str(),
        config.provider.api_key.as_str(),
        config.agent.model.as_str(),
    ));

    let agenda = Arc::new(AgendaStore::new());
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(EchoTool));
    tools.register(Arc::new(ClockTool));
    tools.register(Arc::new(ListEventsTool::new(agenda.clone())));
    tools.register(Arc::new(AddEventTool::new(agenda.clone())));
    tools.register(Arc::new(ListTasksTool::new(agenda.clone())));
    tools.register(Arc::new(AddTaskTool::new(agenda.clone())));
    tools.register(Arc::new(CompleteTaskTool::new(agenda)));

    let options = RequestOptions {
        max_tokens: config.agent.max_tokens,
        temperature: config.agent.temperature,
        deterministic: config.agent.deterministic,
    };

    AgentLoop::new(
        client,
        tools,
        Some(config.agent.model.clone()),
        Some(config.agent.max_depth as usize),
        Some(options),
    )
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("daybot=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_agent_loop_registers_default_tools() {
        let config = Config::default();
        let agent = build_agent_loop(&config);

        let names = agent.tools().tool_names();
        assert_eq!(
            names,
            vec![
                "echo",
                "clock",
                "list_events",
                "add_event",
                "list_tasks",
                "add_task",
                "complete_task"
            ]
        );
    }

    #[test]
    fn test_build_agent_loop_uses_configured_model() {
        let mut config = Config::default();
        config.agent.model = "custom-model".to_string();
        let agent = build_agent_loop(&config);
        assert_eq!(agent.model(), "custom-model");
    }
}
