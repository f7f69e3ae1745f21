//! `daybot onboard` — initialize the configuration file.

use anyhow::Result;
use colored::Colorize;

use daybot_core::config::{get_config_path, load_config, save_config};

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "🗓 Daybot — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();

    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        let config = load_config(None); // defaults + env overrides
        save_config(&config, Some(&config_path))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!(
        "  Set your API key in {} (or export {}), then run {}.",
        config_path.display(),
        "DAYBOT_API_KEY".bold(),
        "daybot chat".bold()
    );
    println!();

    Ok(())
}
