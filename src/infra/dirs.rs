//! Platform-specific directory management
//!
//! Locates the configuration directory, following the XDG Base Directory
//! Specification on Linux and standard locations on macOS and Windows.
//!
//! The `NPM_WITH_DIFF_CONFIG_DIR` environment variable overrides the
//! platform default.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "NPM_WITH_DIFF_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "npm-with-diff";

/// Name of the global config file
const CONFIG_FILE: &str = "config.toml";

/// Platform-specific directory provider
#[derive(Debug, Clone)]
pub struct AppDirs {
    config_dir: PathBuf,
}

impl AppDirs {
    /// Resolve directories from the environment, then platform defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/npm-with-diff` or `~/.config/npm-with-diff`
    /// - macOS: `~/Library/Application Support/npm-with-diff`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the global config file path
    #[must_use]
    pub fn global_config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir().map_or_else(
            || {
                dirs::home_dir().map_or_else(
                    || PathBuf::from(".").join(".config").join(APP_NAME),
                    |h| h.join(".config").join(APP_NAME),
                )
            },
            |p| p.join(APP_NAME),
        )
    }
}

impl Default for AppDirs {
    fn default() -> Self {
        Self::new()
    }
}
