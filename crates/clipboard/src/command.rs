//! Clipboard through platform command-line tools.
//!
//! - macOS: `pbcopy`
//! - Linux: `wl-copy` (Wayland), then `xclip`, then `xsel`
//! - Windows: `clip`
//!
//! Text goes to the tool's stdin; a non-zero exit is a failed write.
//!
//! `xclip` and `wl-copy` fork a child that keeps serving the selection. Only
//! the parent's exit is awaited, and no output pipe is held open, so the
//! forked child never blocks a write.

use crate::{Clipboard, ClipboardError, Result};
use std::future::Future;
use std::io::ErrorKind;
use std::pin::Pin;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub program: String,
    pub args: Vec<String>,
}

impl Tool {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_owned(),
            args: args.iter().map(|a| (*a).to_owned()).collect(),
        }
    }
}

/// Tries each tool in order until one can be spawned.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    tools: Vec<Tool>,
}

impl CommandClipboard {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self { tools }
    }

    /// The usual clipboard tools for the current platform.
    pub fn platform_default() -> Self {
        Self::new(default_tools())
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }
}

fn default_tools() -> Vec<Tool> {
    if cfg!(target_os = "macos") {
        vec![Tool::new("pbcopy", &[])]
    } else if cfg!(target_os = "windows") {
        vec![Tool::new("cmd", &["/C", "clip"])]
    } else {
        vec![
            Tool::new("wl-copy", &[]),
            Tool::new("xclip", &["-selection", "clipboard"]),
            Tool::new("xsel", &["--clipboard", "--input"]),
        ]
    }
}

impl Clipboard for CommandClipboard {
    fn id(&self) -> &str {
        "command"
    }

    fn write<'a>(&'a self, text: &'a str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if self.tools.is_empty() {
                return Err(ClipboardError::Unsupported);
            }
            for tool in &self.tools {
                match pipe_into(tool, text).await {
                    Err(ToolError::NotFound) => {
                        debug!(tool = %tool.program, "clipboard tool not installed, trying next");
                    }
                    Err(ToolError::Failed(e)) => return Err(e),
                    Ok(()) => {
                        debug!(tool = %tool.program, "wrote to clipboard");
                        return Ok(());
                    }
                }
            }
            let names: Vec<&str> = self.tools.iter().map(|t| t.program.as_str()).collect();
            Err(ClipboardError::Unavailable(format!(
                "no clipboard tool available, install one of: {}",
                names.join(", ")
            )))
        })
    }
}

enum ToolError {
    NotFound,
    Failed(ClipboardError),
}

async fn pipe_into(tool: &Tool, text: &str) -> std::result::Result<(), ToolError> {
    let mut child = Command::new(&tool.program)
        .args(&tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ToolError::NotFound,
            ErrorKind::PermissionDenied => ToolError::Failed(ClipboardError::Denied(format!(
                "cannot run {}: {e}",
                tool.program
            ))),
            _ => ToolError::Failed(ClipboardError::Unavailable(format!(
                "failed to start {}: {e}",
                tool.program
            ))),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await.map_err(|e| {
            ToolError::Failed(ClipboardError::Write(format!(
                "failed to write to {}: {e}",
                tool.program
            )))
        })?;
        // closing stdin signals end of input
        drop(stdin);
    }

    let status = child.wait().await.map_err(|e| {
        ToolError::Failed(ClipboardError::Write(format!(
            "failed to wait for {}: {e}",
            tool.program
        )))
    })?;

    if !status.success() {
        return Err(ToolError::Failed(ClipboardError::Write(format!(
            "{} exited with {status}",
            tool.program
        ))));
    }
    Ok(())
}
