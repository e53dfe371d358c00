//! Main chat loop orchestration.
//!
//! Reads lines, dispatches slash commands, and spawns each submission as its
//! own task so the prompt stays live while replies are outstanding. On exit
//! it waits for in-flight replies and drains the persistence queue.

use std::sync::Arc;

use console::style;
use indicatif::MultiProgress;
use rustyline_async::SharedWriter;
use tokio::task::JoinSet;
use tracing::{debug, info};

use relaychat_core::chat::conversation::{Conversation, ConversationConfig};
use relaychat_core::chat::persistence::PersistenceQueue;
use relaychat_infra::client::HttpRelayClient;
use relaychat_types::config::ClientConfig;

use super::attach::load_attachment;
use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::view::{ConsoleView, format_turn};

type TerminalConversation = Conversation<HttpRelayClient, ConsoleView<SharedWriter>>;

/// Run the interactive chat loop against the relay in `config`.
pub async fn run_chat_loop(config: &ClientConfig) -> anyhow::Result<()> {
    let client = HttpRelayClient::new(&config.relay_base_url);
    let persistence = PersistenceQueue::spawn(client.clone());

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let view = ConsoleView::new(writer, MultiProgress::new());
    let conversation: Arc<TerminalConversation> = Arc::new(Conversation::new(
        client.clone(),
        view,
        persistence.clone(),
        ConversationConfig::from(config),
    ));

    print_welcome_banner(client.base_url(), &conversation.session_id().to_string());
    info!(relay = %client.base_url(), "Chat session started");

    let mut in_flight = JoinSet::new();

    loop {
        // Reap finished submissions so the set does not grow unbounded.
        while in_flight.try_join_next().is_some() {}

        match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                conversation
                    .view()
                    .print(&format!("  {}", style("Press Ctrl+D to exit, or keep chatting.").dim()));
            }
            InputEvent::Line(line) => {
                if let Some(cmd) = commands::parse(&line) {
                    let keep_going = run_command(cmd, &conversation, &client, &mut chat_input).await;
                    if !keep_going {
                        break;
                    }
                    continue;
                }

                let conversation = conversation.clone();
                in_flight.spawn(async move {
                    if conversation.submit(&line).await.is_none() {
                        debug!("Ignored empty submission");
                    }
                });
            }
        }
    }

    let pending = in_flight.len();
    if pending > 0 {
        let noun = if pending == 1 { "reply" } else { "replies" };
        conversation.view().print(&format!(
            "  {}",
            style(format!("Waiting for {pending} pending {noun}...")).dim()
        ));
    }
    while in_flight.join_next().await.is_some() {}
    persistence.flush().await;

    conversation
        .view()
        .print(&format!("\n  {}", style("Session ended.").dim()));
    chat_input.flush();
    Ok(())
}

/// Execute one slash command. Returns `false` when the loop should end.
async fn run_command(
    cmd: ChatCommand,
    conversation: &TerminalConversation,
    client: &HttpRelayClient,
    chat_input: &mut ChatInput,
) -> bool {
    let view = conversation.view();
    match cmd {
        ChatCommand::Help => view.print(&commands::help_text()),
        ChatCommand::Attach(path) => match load_attachment(&path).await {
            Ok(attachment) => conversation.attach(attachment),
            Err(e) => view.print(&format!("  {} {e}", style("!").red().bold())),
        },
        ChatCommand::Cancel => {
            if conversation.pending_attachment().is_some() {
                conversation.cancel_attachment();
                view.print(&format!("  {}", style("Attachment dropped.").dim()));
            } else {
                view.print(&format!("  {}", style("No attachment pending.").dim()));
            }
        }
        ChatCommand::History => {
            let history = conversation.history();
            if history.is_empty() {
                view.print(&format!("  {}", style("No messages yet.").dim()));
            }
            for turn in &history {
                view.print(&format_turn(turn));
            }
        }
        ChatCommand::Transcript => match client.transcript().await {
            Ok(records) => {
                view.print(&format!(
                    "\n  {} ({} records)",
                    style("Stored transcript").bold(),
                    records.len()
                ));
                for record in &records {
                    view.print(&format!(
                        "  {} {} {}",
                        style(record.created_at.format("%Y-%m-%d %H:%M:%S")).dim(),
                        style(&record.role).bold(),
                        record.text
                    ));
                }
            }
            Err(e) => view.print(&format!(
                "  {} Could not fetch transcript: {e}",
                style("!").red().bold()
            )),
        },
        ChatCommand::Clear => chat_input.clear(),
        ChatCommand::Exit => return false,
        ChatCommand::Unknown(name) => view.print(&format!(
            "  {} Unknown command: {}. Type /help for available commands.",
            style("?").yellow().bold(),
            style(name).dim()
        )),
    }
    true
}
