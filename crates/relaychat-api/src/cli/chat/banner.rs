//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(relay_url: &str, session_id: &str) {
    println!();
    println!("  {} {}", style("*").cyan(), style("relaychat").cyan().bold());
    println!();
    println!("  {}  {}", style("Relay:").bold(), style(relay_url).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
