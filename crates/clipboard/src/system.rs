//! OS clipboard via `arboard`.
//!
//! `arboard` is synchronous, so each write runs on the blocking pool. On X11
//! the selection is owned by this process: contents survive exit only when a
//! clipboard manager is running. Short-lived CLIs on Linux are usually better
//! served by `CommandClipboard`.

use crate::{Clipboard, ClipboardError, Result};
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn id(&self) -> &str {
        "system"
    }

    fn write<'a>(&'a self, text: &'a str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let text = text.to_owned();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || {
                let mut clipboard = arboard::Clipboard::new().map_err(classify)?;
                clipboard.set_text(text).map_err(classify)?;
                debug!("wrote to system clipboard");
                Ok(())
            })
            .await
            .map_err(|e| ClipboardError::Write(format!("clipboard task failed: {e}")))?
        })
    }
}

fn classify(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ClipboardNotSupported => ClipboardError::Unsupported,
        arboard::Error::ClipboardOccupied => {
            ClipboardError::Denied("clipboard is held by another process".into())
        }
        other => ClipboardError::Unavailable(other.to_string()),
    }
}
