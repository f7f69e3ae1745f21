//! Shared CLI helpers — response printing, history rendering, version banner.

use colored::Colorize;

use daybot_core::transcript::Transcript;
use daybot_core::types::Role;

/// Print an agent response to stdout.
pub fn print_response(response: &str) {
    println!();
    println!("{}", "🗓 Daybot".cyan().bold());
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
    println!();
}

/// Print the user-visible conversation history.
///
/// Thought entries never appear here — the transcript's visible view
/// already filters them.
pub fn print_history(transcript: &Transcript) {
    println!();
    let mut any = false;
    for msg in transcript.visible_to_user() {
        any = true;
        let label = match msg.role {
            Role::System => "system".dimmed().to_string(),
            Role::User => "You".green().bold().to_string(),
            Role::Assistant => "Daybot".cyan().bold().to_string(),
            // visible_to_user never yields thoughts
            Role::Thought => continue,
        };
        println!("{label}: {}", msg.content);
    }
    if !any {
        println!("{}", "(empty conversation)".dimmed());
    }
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🗓 Daybot".cyan().bold(), version.dimmed());
    println!(
        "{}",
        "Type a message, \"/history\", \"/clear\", or \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print a "thinking" spinner placeholder (for non-log mode).
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
