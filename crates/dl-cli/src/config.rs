//! Configuration loading and management.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use dl_sources::SourceSettings;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Anthropic API key for the summary command.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Source configuration, keyed by source kind.
    #[serde(default)]
    pub sources: BTreeMap<String, SourceSettings>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DAYLOG_*)
        figment = figment.merge(Env::prefixed("DAYLOG_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for daylog.
///
/// On Linux: `~/.config/daylog`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("daylog"))
}
