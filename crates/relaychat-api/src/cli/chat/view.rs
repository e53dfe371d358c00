//! Console rendering of the conversation.
//!
//! Every line goes through one writer (the readline `SharedWriter` in the
//! real loop) so output never tears the prompt. Each pending reply gets its
//! own spinner under a shared `MultiProgress`.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use relaychat_core::chat::view::{ChatView, PlaceholderId};
use relaychat_types::chat::{Attachment, Turn};

/// Terminal implementation of [`ChatView`].
pub struct ConsoleView<W: Write + Send> {
    out: Mutex<W>,
    progress: MultiProgress,
    spinners: Mutex<HashMap<PlaceholderId, ProgressBar>>,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W, progress: MultiProgress) -> Self {
        Self {
            out: Mutex::new(out),
            progress,
            spinners: Mutex::new(HashMap::new()),
        }
    }

    /// Write one block of text and flush.
    pub fn print(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }

    fn take_spinner(&self, id: PlaceholderId) -> Option<ProgressBar> {
        self.spinners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

/// One line for a turn: role label, text, and an attachment marker.
pub fn format_turn(turn: &Turn) -> String {
    let label = match turn.role {
        relaychat_types::chat::Role::User => style("You").green().bold(),
        relaychat_types::chat::Role::Model => style("Bot").cyan().bold(),
    };
    let mut line = format!("  {label} {}", turn.text);
    if let Some(attachment) = &turn.attachment {
        line.push_str(&format!(" {}", style(format!("[{}]", attachment.mime_type)).dim()));
    }
    line
}

impl<W: Write + Send> ChatView for ConsoleView<W> {
    fn render_user_turn(&self, turn: &Turn) {
        self.print(&format_turn(turn));
    }

    fn render_placeholder(&self, id: PlaceholderId) {
        let spinner = self.progress.add(ProgressBar::new_spinner());
        spinner.set_style(Self::spinner_style());
        spinner.set_message(format!("thinking... (#{id})"));
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, spinner);
    }

    fn resolve_placeholder(&self, id: PlaceholderId, text: &str) {
        if let Some(spinner) = self.take_spinner(id) {
            spinner.finish_and_clear();
        }
        self.print(&format!("\n  {} {text}\n", style("Bot").cyan().bold()));
    }

    fn fail_placeholder(&self, id: PlaceholderId, message: &str) {
        if let Some(spinner) = self.take_spinner(id) {
            spinner.finish_and_clear();
        }
        self.print(&format!("\n  {} {}\n", style("Bot").cyan().bold(), style(message).red()));
    }

    fn finalize_placeholder(&self, id: PlaceholderId) {
        // Already cleared on resolve/fail; this catches any leftover.
        if let Some(spinner) = self.take_spinner(id) {
            spinner.finish_and_clear();
        }
    }

    fn attachment_changed(&self, attachment: Option<&Attachment>) {
        if let Some(a) = attachment {
            self.print(&format!(
                "  {} {} attached; it goes with your next message (/cancel to drop)",
                style("+").cyan().bold(),
                a.mime_type
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use indicatif::ProgressDrawTarget;

    use super::*;

    fn view() -> ConsoleView<Vec<u8>> {
        ConsoleView::new(
            Vec::new(),
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        )
    }

    fn output(view: &ConsoleView<Vec<u8>>) -> String {
        console::strip_ansi_codes(&String::from_utf8_lossy(&view.out.lock().unwrap())).into_owned()
    }

    #[test]
    fn test_user_turn_is_printed() {
        let view = view();
        view.render_user_turn(&Turn::user("Hello"));
        assert!(output(&view).contains("You Hello"));
    }

    #[test]
    fn test_user_turn_shows_attachment_type() {
        let view = view();
        let turn = Turn::user("look").with_attachment(Some(Attachment::from_bytes(b"x", "image/png")));
        view.render_user_turn(&turn);
        assert!(output(&view).contains("[image/png]"));
    }

    #[test]
    fn test_placeholder_lifecycle_on_success() {
        let view = view();
        view.render_placeholder(0);
        assert_eq!(view.spinners.lock().unwrap().len(), 1);

        view.resolve_placeholder(0, "Hi there");
        view.finalize_placeholder(0);

        assert!(view.spinners.lock().unwrap().is_empty());
        assert!(output(&view).contains("Bot Hi there"));
    }

    #[test]
    fn test_failed_placeholder_shows_message() {
        let view = view();
        view.render_placeholder(3);
        view.fail_placeholder(3, "Error getting response");
        view.finalize_placeholder(3);

        assert!(output(&view).contains("Error getting response"));
        assert!(view.spinners.lock().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_placeholders_are_independent() {
        let view = view();
        view.render_placeholder(0);
        view.render_placeholder(1);

        view.resolve_placeholder(1, "second");
        assert!(view.spinners.lock().unwrap().contains_key(&0));

        view.resolve_placeholder(0, "first");
        assert!(view.spinners.lock().unwrap().is_empty());
    }
}
