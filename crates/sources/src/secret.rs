//! Secret sources: static value, environment variable, file, and a chain.

use crate::{Result, SecretSource, SourceError};
use common::Secret;
use std::path::PathBuf;
use tracing::debug;
use zeroize::Zeroize;

/// Fixed secret, mostly for tests and embedding.
pub struct StaticSecret(Secret<String>);

impl StaticSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Secret::new(value.into()))
    }
}

impl SecretSource for StaticSecret {
    fn id(&self) -> &str {
        "static"
    }

    fn secret(&self) -> Result<Secret<String>> {
        Ok(self.0.clone())
    }
}

/// Reads the secret from an environment variable on every call.
pub struct EnvSecret {
    var: String,
}

impl EnvSecret {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretSource for EnvSecret {
    fn id(&self) -> &str {
        "env"
    }

    fn secret(&self) -> Result<Secret<String>> {
        match std::env::var(&self.var) {
            Ok(value) => Ok(Secret::new(value)),
            Err(std::env::VarError::NotPresent) => Err(SourceError::EnvMissing(self.var.clone())),
            Err(std::env::VarError::NotUnicode(_)) => {
                Err(SourceError::EnvNotUnicode(self.var.clone()))
            }
        }
    }
}

/// Reads the secret from a file on every call, trimming surrounding
/// whitespace (a trailing newline from `echo key > file` is common).
pub struct FileSecret {
    path: PathBuf,
}

impl FileSecret {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SecretSource for FileSecret {
    fn id(&self) -> &str {
        "file"
    }

    fn secret(&self) -> Result<Secret<String>> {
        let mut raw = std::fs::read_to_string(&self.path).map_err(|source| SourceError::File {
            path: self.path.clone(),
            source,
        })?;
        let secret = Secret::new(raw.trim().to_owned());
        raw.zeroize();
        Ok(secret)
    }
}

/// Tries each source in order; the first one that yields a value wins.
///
/// Mirrors the usual precedence of an environment variable over a key file.
pub struct ChainedSecret {
    sources: Vec<Box<dyn SecretSource>>,
}

impl ChainedSecret {
    pub fn new(sources: Vec<Box<dyn SecretSource>>) -> Self {
        Self { sources }
    }
}

impl SecretSource for ChainedSecret {
    fn id(&self) -> &str {
        "chain"
    }

    fn secret(&self) -> Result<Secret<String>> {
        let mut last_err = None;
        for source in &self.sources {
            match source.secret() {
                Ok(secret) => return Ok(secret),
                Err(e) => {
                    debug!(
                        source = source.id(),
                        error = %e,
                        "secret source unavailable, trying next"
                    );
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or(SourceError::Exhausted))
    }
}
