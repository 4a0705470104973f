use crate::error::ConfigResult;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// How much structural checking a tree performs after each mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// No checking
    #[default]
    Off,
    /// Validate after every insert/delete and log violations
    Log,
    /// Validate after every insert/delete and panic on a violation
    Strict,
}

/// Tree configuration, read from the `[tree]` section of a TOML document.
///
/// ```toml
/// [tree]
/// checks = "log"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Post-mutation invariant checking
    pub checks: CheckMode,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    tree: TreeConfig,
}

impl TreeConfig {
    /// Configuration that panics as soon as an invariant breaks.
    pub fn strict() -> Self {
        Self {
            checks: CheckMode::Strict,
        }
    }

    pub fn with_checks(mut self, checks: CheckMode) -> Self {
        self.checks = checks;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from TOML string; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        debug!(checks = ?file.tree.checks, "loaded tree config");
        Ok(file.tree)
    }
}
