//! Command-line parsing
//!
//! Small enough that a hand-written parser covers it: one subcommand plus a
//! handful of flags.

use anyhow::{Result, anyhow, bail};
use clipboard::Backend;

pub const USAGE: &str = "\
usage: keyview [show|copy] [options]

commands:
  show               print the API key as the current license allows (default)
  copy               copy the raw API key to the clipboard (Pro only)

options:
  --config <path>    config file (default: $KEYVIEW_CONFIG or ./keyview.toml)
  --clipboard <name> clipboard backend: system, command or memory
  --json             print `show` output as JSON
  -h, --help         print this help";

const BACKENDS: &str = "system, command or memory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Copy,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub command: Command,
    pub config: Option<String>,
    pub clipboard: Option<Backend>,
    pub json: bool,
}

impl Cli {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = None;
        let mut config = None;
        let mut clipboard = None;
        let mut json = false;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    config = Some(
                        args.next()
                            .ok_or_else(|| anyhow!("--config needs a path"))?,
                    );
                }
                "--clipboard" => {
                    let name = args
                        .next()
                        .ok_or_else(|| anyhow!("--clipboard needs a backend name"))?;
                    let backend = Backend::parse(&name).ok_or_else(|| {
                        anyhow!("unknown clipboard backend {name:?}, expected {BACKENDS}")
                    })?;
                    clipboard = Some(backend);
                }
                "--json" => json = true,
                "-h" | "--help" => command = Some(Command::Help),
                "show" | "copy" if command.is_some() => {
                    bail!("only one command may be given, got extra {arg:?}")
                }
                "show" => command = Some(Command::Show),
                "copy" => command = Some(Command::Copy),
                other => bail!("unexpected argument {other:?}"),
            }
        }

        Ok(Self {
            command: command.unwrap_or(Command::Show),
            config,
            clipboard,
            json,
        })
    }
}
