//! In-process clipboard that records writes.

use crate::{Clipboard, ClipboardError, Result};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

/// Keeps every write in memory. Can be switched to fail, which makes it the
/// stand-in for a denied platform clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
    failure: Mutex<Option<ClipboardError>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every write fails with `err`.
    pub fn failing(err: ClipboardError) -> Self {
        let clipboard = Self::new();
        clipboard.set_failure(Some(err));
        clipboard
    }

    pub fn set_failure(&self, err: Option<ClipboardError>) {
        *self.failure.lock().unwrap_or_else(|p| p.into_inner()) = err;
    }

    /// All successful writes, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Current contents (the last successful write).
    pub fn contents(&self) -> Option<String> {
        self.writes
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .last()
            .cloned()
    }
}

impl Clipboard for MemoryClipboard {
    fn id(&self) -> &str {
        "memory"
    }

    fn write<'a>(&'a self, text: &'a str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let failure: Option<ClipboardError> = self
                .failure
                .lock()
                .unwrap_or_else(|p| p.into_inner())
                .clone();
            if let Some(err) = failure {
                return Err(err);
            }
            self.writes
                .lock()
                .unwrap_or_else(|p| p.into_inner())
                .push(text.to_owned());
            Ok(())
        })
    }
}
