//! `daybot status` — show the effective configuration.

use anyhow::Result;
use colored::Colorize;

use daybot_core::config::{get_config_path, load_config};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "🗓 Daybot Status".cyan().bold());
    println!();

    // Config
    let config_exists = config_path.exists();
    println!(
        "  {:<14} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Model + generation settings
    println!("  {:<14} {}", "Model:".bold(), config.agent.model);
    println!(
        "  {:<14} temperature {} | max_tokens {} | max_depth {}",
        "Generation:".bold(),
        if config.agent.deterministic {
            "off (deterministic)".to_string()
        } else {
            config.agent.temperature.to_string()
        },
        config.agent.max_tokens,
        config.agent.max_depth
    );

    // Provider
    println!("  {:<14} {}", "API base:".bold(), config.provider.api_base);
    println!(
        "  {:<14} {}",
        "API key:".bold(),
        if config.provider.api_key.is_empty() {
            "(not set)".red().to_string()
        } else {
            "✓ set".green().to_string()
        }
    );

    println!();
    Ok(())
}
