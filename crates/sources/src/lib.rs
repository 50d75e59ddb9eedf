//! Secret and entitlement sources
//!
//! The display component reads both inputs through these traits on every
//! render and on every copy attempt. Implementations must not cache: a
//! license downgrade or a rotated key has to show up on the next read.

pub mod entitlement;
pub mod secret;

pub use entitlement::{EnvEntitlement, StaticEntitlement};
pub use secret::{ChainedSecret, EnvSecret, FileSecret, StaticSecret};

use common::Secret;
use std::path::PathBuf;

/// Errors from reading a secret.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("environment variable {0} is not set")]
    EnvMissing(String),

    #[error("environment variable {0} is not valid unicode")]
    EnvNotUnicode(String),

    #[error("failed to read secret file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no source produced a secret")]
    Exhausted,
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Serializes tests that read or write the process environment.
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Provides the raw API key.
pub trait SecretSource: Send + Sync {
    /// Short name for log fields (e.g. "env", "file").
    fn id(&self) -> &str;

    /// Read the current secret. Called fresh on every evaluation.
    fn secret(&self) -> Result<Secret<String>>;
}

/// Answers whether the viewer may reveal and copy the secret.
pub trait EntitlementSource: Send + Sync {
    fn id(&self) -> &str;

    /// Called fresh on every evaluation; never cached by callers.
    fn is_entitled(&self) -> bool;
}
