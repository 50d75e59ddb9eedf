//! Entitlement sources: a fixed flag and an environment override.

use crate::EntitlementSource;
use tracing::warn;

/// Fixed entitlement, typically the `license.pro` config flag.
pub struct StaticEntitlement(bool);

impl StaticEntitlement {
    pub fn new(entitled: bool) -> Self {
        Self(entitled)
    }
}

impl EntitlementSource for StaticEntitlement {
    fn id(&self) -> &str {
        "static"
    }

    fn is_entitled(&self) -> bool {
        self.0
    }
}

/// Reads a license flag from an environment variable on every call and
/// falls back to a fixed value when it is unset or unrecognized.
pub struct EnvEntitlement {
    var: String,
    fallback: bool,
}

impl EnvEntitlement {
    pub fn new(var: impl Into<String>, fallback: bool) -> Self {
        Self {
            var: var.into(),
            fallback,
        }
    }
}

impl EntitlementSource for EnvEntitlement {
    fn id(&self) -> &str {
        "env"
    }

    fn is_entitled(&self) -> bool {
        let Ok(value) = std::env::var(&self.var) else {
            return self.fallback;
        };
        match parse_flag(&value) {
            Some(flag) => flag,
            None => {
                warn!(var = %self.var, value = %value, "unrecognized license flag, using fallback");
                self.fallback
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "pro" => Some(true),
        "0" | "false" | "no" | "off" | "free" => Some(false),
        _ => None,
    }
}
