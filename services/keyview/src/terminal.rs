//! Terminal rendering and acknowledgments

use masked_display::{Acknowledger, Acknowledgment, InteractionState, RenderedView};
use std::future::Future;
use std::io::IsTerminal;
use std::pin::Pin;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

/// Human-readable form of a render.
pub fn render_text(view: &RenderedView) -> String {
    match view.state {
        InteractionState::Unlocked => format!("API Key: {}", view.value),
        InteractionState::Locked => format!(
            "API Key: {}\n(locked: a Pro license is required to reveal or copy the key)",
            view.value
        ),
    }
}

/// Warning for an unlocked view whose key came back empty, which means no
/// secret source produced a value and the clipboard now holds "".
pub fn empty_key_hint(view: &RenderedView) -> Option<&'static str> {
    (view.state == InteractionState::Unlocked && view.value.is_empty()).then_some(
        "warning: the copied API key was empty; \
         set the secret.env variable or secret.file in the config",
    )
}

/// One notice as printed to the terminal.
pub fn format_ack(ack: &Acknowledgment) -> String {
    let mut out = format!("{}: {}\n[{}]", ack.title, ack.message, ack.confirm_label);
    if ack.show_cancel {
        out.push_str(" [Cancel]");
    }
    out
}

/// Prints notices to stdout and, on an interactive terminal, waits for
/// Enter before returning. Piped stdin is never waited on.
pub struct TerminalAcknowledger {
    wait_for_enter: bool,
}

impl TerminalAcknowledger {
    pub fn new(wait_for_enter: bool) -> Self {
        Self { wait_for_enter }
    }

    pub fn detect() -> Self {
        Self::new(std::io::stdin().is_terminal())
    }
}

impl Acknowledger for TerminalAcknowledger {
    fn show(&self, ack: Acknowledgment) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            let mut stdout = tokio::io::stdout();
            let text = format!("{}\n", format_ack(&ack));
            if let Err(e) = stdout.write_all(text.as_bytes()).await {
                debug!(error = %e, "failed to print acknowledgment");
                return;
            }
            if let Err(e) = stdout.flush().await {
                debug!(error = %e, "failed to flush acknowledgment");
            }

            if self.wait_for_enter {
                let mut line = String::new();
                // EOF or a read error counts as dismissal
                let _ = BufReader::new(tokio::io::stdin())
                    .read_line(&mut line)
                    .await;
            }
        })
    }
}
