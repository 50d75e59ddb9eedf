//! Clipboard abstraction
//!
//! Callers depend on the `Clipboard` trait only. Backends:
//! - `SystemClipboard` talks to the OS clipboard through `arboard`
//! - `CommandClipboard` pipes text into a platform tool (`pbcopy`, `wl-copy`, ...)
//! - `MemoryClipboard` keeps writes in-process (dry runs and tests)
//!
//! A write either lands whole or fails; backends never leave partial content.

pub mod command;
pub mod memory;
pub mod system;

pub use command::CommandClipboard;
pub use memory::MemoryClipboard;
pub use system::SystemClipboard;

use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Why a clipboard write did not happen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard access denied: {0}")]
    Denied(String),

    #[error("clipboard write failed: {0}")]
    Write(String),

    #[error("clipboard not supported on this platform")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Host clipboard service: `write(text) -> success | failure`.
///
/// Uses `Pin<Box<dyn Future>>` so it stays dyn-compatible (`Arc<dyn Clipboard>`).
/// Implementations never assume exclusive access to the clipboard.
pub trait Clipboard: Send + Sync {
    /// Backend name for logs (e.g. "system", "command", "memory").
    fn id(&self) -> &str;

    /// Replace the clipboard contents with `text`.
    fn write<'a>(&'a self, text: &'a str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Backend selector used by configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    System,
    #[default]
    Command,
    Memory,
}

impl Backend {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "system" => Some(Self::System),
            "command" => Some(Self::Command),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }

    /// Build the clipboard for this backend.
    pub fn build(self) -> Arc<dyn Clipboard> {
        match self {
            Backend::System => Arc::new(SystemClipboard::new()),
            Backend::Command => Arc::new(CommandClipboard::platform_default()),
            Backend::Memory => Arc::new(MemoryClipboard::new()),
        }
    }
}
