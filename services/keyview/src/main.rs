//! keyview
//!
//! Shows an API key masked according to the license tier and copies the raw
//! key to the clipboard for Pro users:
//! 1. Loads config (key source, license flag, mask char, clipboard backend)
//! 2. `show`: prints the masked key, or a fixed placeholder when locked
//! 3. `copy`: writes the raw key to the clipboard and acknowledges the result

mod cli;
mod config;
mod terminal;

use anyhow::{Context, Result};
use masked_display::{Acknowledger, CopyOutcome, MaskedSecretDisplay};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, USAGE};
use crate::config::Config;
use crate::terminal::TerminalAcknowledger;

const EXIT_OK: u8 = 0;
/// Exit code when the clipboard refused the write.
const EXIT_COPY_FAILED: u8 = 1;
/// Exit code when copy was requested without a Pro license.
const EXIT_LOCKED: u8 = 2;

/// Serializes tests that read or write the process environment. Shared by
/// every test module in this binary.
#[cfg(test)]
static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // JSON logs on stderr so stdout stays clean for `show --json`
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse(std::env::args().skip(1)).context("invalid arguments (try --help)")?;
    if cli.command == Command::Help {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    }

    let config_path = Config::resolve_path(cli.config.as_deref());
    debug!(
        path = %config_path.path.display(),
        explicit = config_path.explicit,
        "loading configuration"
    );

    let config = Config::load_resolved(&config_path).with_context(|| {
        format!(
            "failed to load config from {}",
            config_path.path.display()
        )
    })?;

    let display = build_display(&config, &cli, Arc::new(TerminalAcknowledger::detect()))?;
    let code = run(&display, &cli).await?;
    Ok(ExitCode::from(code))
}

fn build_display(
    config: &Config,
    cli: &Cli,
    acknowledger: Arc<dyn Acknowledger>,
) -> Result<MaskedSecretDisplay> {
    let backend = cli.clipboard.unwrap_or(config.clipboard.backend);
    let mask_char = config.display.mask_char()?;
    info!(
        backend = ?backend,
        secret_env = %config.secret.env,
        secret_file = config.secret.file.is_some(),
        "configuration loaded"
    );

    Ok(MaskedSecretDisplay::new(
        config.secret_source(),
        config.entitlement_source(),
        backend.build(),
        acknowledger,
    )
    .with_mask_char(mask_char))
}

async fn run(display: &MaskedSecretDisplay, cli: &Cli) -> Result<u8> {
    match cli.command {
        Command::Show | Command::Help => {
            let view = display.render();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&view).context("failed to serialize view")?
                );
            } else {
                println!("{}", terminal::render_text(&view));
            }
            Ok(EXIT_OK)
        }
        Command::Copy => Ok(match display.attempt_copy().await {
            CopyOutcome::Copied => {
                if let Some(hint) = terminal::empty_key_hint(&display.render()) {
                    eprintln!("{hint}");
                }
                EXIT_OK
            }
            CopyOutcome::Failed(_) => EXIT_COPY_FAILED,
            CopyOutcome::Locked => {
                eprintln!("copy is locked: a Pro license is required");
                EXIT_LOCKED
            }
        }),
    }
}
