//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono::Duration;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Rendezvous window in seconds.
    pub window_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self { window_secs: 3600 }
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

        // Load from environment variables (RDZ_*)
        figment = figment.merge(Env::prefixed("RDZ_"));

        figment.extract()
    }

    /// The configured rendezvous window as a duration.
    pub fn window(&self) -> Duration {
        window_duration(self.window_secs)
    }
}

/// Converts a window in whole seconds to a duration, saturating on
/// absurdly large values.
pub fn window_duration(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

/// Returns the platform-specific config directory for rdz.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rdz"))
}
