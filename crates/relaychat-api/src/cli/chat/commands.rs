//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`; any other line is a chat submission.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Attach a file to the next message.
    Attach(String),
    /// Drop the pending attachment.
    Cancel,
    /// Show this session's in-memory turns.
    History,
    /// Fetch the stored transcript from the relay.
    Transcript,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Unknown command or missing argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    Some(match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/attach" | "/a" if arg.is_empty() => {
            ChatCommand::Unknown("/attach requires a file path".to_string())
        }
        "/attach" | "/a" => ChatCommand::Attach(arg.to_string()),
        "/cancel" => ChatCommand::Cancel,
        "/history" => ChatCommand::History,
        "/transcript" => ChatCommand::Transcript,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    })
}

/// Help text listing all available commands.
pub fn help_text() -> String {
    let rows = [
        ("/help", "Show this help message"),
        ("/attach <path>", "Attach an image to your next message"),
        ("/cancel", "Drop the pending attachment"),
        ("/history", "Show this session's conversation"),
        ("/transcript", "Show every stored message from the relay"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat session"),
    ];

    let mut out = format!("\n  {}\n\n", style("Available commands:").bold());
    for (cmd, desc) in rows {
        out.push_str(&format!("  {:<16} {desc}\n", style(cmd).cyan()));
    }
    out.push_str(&format!(
        "\n  {}\n",
        style("Replies arrive as they are ready; keep typing while you wait.").dim()
    ));
    out
}
