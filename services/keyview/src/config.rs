//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! The API key itself never lives in the TOML: it comes from an env var or
//! a key file, read fresh on every render.

use clipboard::Backend;
use common::{Error, Result};
use serde::Deserialize;
use sources::{
    ChainedSecret, EntitlementSource, EnvEntitlement, EnvSecret, FileSecret, SecretSource,
    StaticEntitlement,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_CONFIG_FILE: &str = "keyview.toml";

/// Root configuration. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub secret: SecretConfig,
    pub license: LicenseConfig,
    pub display: DisplayConfig,
    pub clipboard: ClipboardConfig,
}

/// Where the API key comes from
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecretConfig {
    /// Env var holding the key; checked before `file`
    pub env: String,
    pub file: Option<PathBuf>,
}

impl Default for SecretConfig {
    fn default() -> Self {
        Self {
            env: "KEYVIEW_API_KEY".into(),
            file: None,
        }
    }
}

/// License tier. `pro = true` unlocks reveal and copy.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LicenseConfig {
    pub pro: bool,
    /// Env var that overrides `pro` at every read
    pub env: Option<String>,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            pro: false,
            env: Some("KEYVIEW_PRO".into()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub mask_char: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mask_char: masked_display::DEFAULT_MASK_CHAR.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipboardConfig {
    pub backend: Backend,
}

/// Config path plus whether the user asked for it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPath {
    pub path: PathBuf,
    /// Explicit paths must exist; the default path may be absent.
    pub explicit: bool,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a resolved path; a missing default file means all defaults.
    pub fn load_resolved(resolved: &ConfigPath) -> Result<Self> {
        if !resolved.explicit && !resolved.path.exists() {
            return Ok(Self::default());
        }
        Self::load(&resolved.path)
    }

    fn validate(&self) -> Result<()> {
        if self.secret.env.trim().is_empty() {
            return Err(Error::InvalidField {
                field: "secret.env",
                reason: "must not be empty".into(),
            });
        }
        if self
            .license
            .env
            .as_deref()
            .is_some_and(|var| var.trim().is_empty())
        {
            return Err(Error::InvalidField {
                field: "license.env",
                reason: "must not be empty".into(),
            });
        }
        self.display.mask_char()?;
        Ok(())
    }

    /// Env var first, then the key file if configured.
    pub fn secret_source(&self) -> Arc<dyn SecretSource> {
        let mut chain: Vec<Box<dyn SecretSource>> =
            vec![Box::new(EnvSecret::new(self.secret.env.clone()))];
        if let Some(file) = &self.secret.file {
            chain.push(Box::new(FileSecret::new(file.clone())));
        }
        Arc::new(ChainedSecret::new(chain))
    }

    pub fn entitlement_source(&self) -> Arc<dyn EntitlementSource> {
        match &self.license.env {
            Some(var) => Arc::new(EnvEntitlement::new(var.clone(), self.license.pro)),
            None => Arc::new(StaticEntitlement::new(self.license.pro)),
        }
    }

    /// Resolve config file path from CLI arg or KEYVIEW_CONFIG env var.
    pub fn resolve_path(cli_path: Option<&str>) -> ConfigPath {
        if let Some(p) = cli_path {
            return ConfigPath {
                path: PathBuf::from(p),
                explicit: true,
            };
        }
        if let Ok(p) = std::env::var("KEYVIEW_CONFIG") {
            return ConfigPath {
                path: PathBuf::from(p),
                explicit: true,
            };
        }
        ConfigPath {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            explicit: false,
        }
    }
}

impl DisplayConfig {
    /// The configured mask character; exactly one visible char.
    pub fn mask_char(&self) -> Result<char> {
        let mut chars = self.mask_char.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => Ok(c),
            _ => Err(Error::InvalidField {
                field: "display.mask_char",
                reason: format!(
                    "must be a single non-whitespace character, got {:?}",
                    self.mask_char
                ),
            }),
        }
    }
}
