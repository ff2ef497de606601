use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::policy::Policy;
use crate::rules::{Catalogue, Thresholds};

/// Top-level configuration from `.appaudit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub policy: Policy,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Built-in catalogue with this config's thresholds and disabled checks applied.
    pub fn catalogue(&self) -> Result<Catalogue> {
        Catalogue::builtin_without(&self.thresholds, &self.policy.disabled_checks)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# appaudit configuration

[thresholds]
# Lowest acceptable minimum TLS version.
min_tls_version = "1.2"
# Production plans with fewer instances are flagged as lacking redundancy.
min_instance_count = 2

[policy]
# Minimum severity that fails the run (low, medium, high, critical).
fail_on = "high"

# Check ids to leave out of the catalogue.
# disabled_checks = ["APPSVC-006"]
"#
    }
}
