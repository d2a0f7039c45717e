//! Global configuration management
//!
//! Reads settings from `config.toml` in the config directory: which npm
//! executable to run, how deep to list the dependency tree, whether dev
//! dependencies take part in the diff, and output preferences.
//!
//! Command-line flags always win over the file, and the file wins over
//! built-in defaults; [`GlobalConfig::resolve`] applies that precedence.

use crate::config::defaults;
use crate::error::ConfigError;
use crate::infra::dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Global configuration for npm-with-diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// npm invocation settings
    #[serde(default)]
    pub npm: NpmConfig,

    /// Diff settings
    #[serde(default)]
    pub diff: DiffConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// npm invocation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpmConfig {
    /// Name or path of the npm executable
    pub program: Option<String>,
}

/// Diff settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Depth passed to `npm ls`
    pub depth: Option<u32>,

    /// Leave dev dependencies out of the diff
    pub omit_dev: Option<bool>,
}

/// Output preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Only print the final report
    pub quiet: Option<bool>,

    /// Print the result as JSON
    pub json: Option<bool>,
}

/// Settings given on the command line; `None` means "not given"
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub depth: Option<u32>,
    pub omit_dev: bool,
    pub quiet: bool,
    pub json: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub npm_program: String,
    pub depth: u32,
    pub omit_dev: bool,
    pub quiet: bool,
    pub json: bool,
}

impl GlobalConfig {
    /// Load global configuration from the config directory
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if the config file exists but
    /// contains invalid TOML.
    pub fn load(dirs: &AppDirs) -> Result<Self, ConfigError> {
        Self::load_from_path(&dirs.global_config_path())
    }

    /// Load global configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Get the effective npm executable
    #[must_use]
    pub fn npm_program(&self) -> &str {
        self.npm
            .program
            .as_deref()
            .unwrap_or(defaults::DEFAULT_NPM_PROGRAM)
    }

    /// Get the effective listing depth
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.diff.depth.unwrap_or(defaults::DEFAULT_TREE_DEPTH)
    }

    /// Get the effective dev dependency setting
    #[must_use]
    pub fn omit_dev(&self) -> bool {
        self.diff.omit_dev.unwrap_or(defaults::DEFAULT_OMIT_DEV)
    }

    /// Combine with command-line flags
    ///
    /// Boolean flags can only switch a setting on; they never turn off
    /// something the config file enabled.
    #[must_use]
    pub fn resolve(&self, cli: CliOverrides) -> EffectiveConfig {
        EffectiveConfig {
            npm_program: self.npm_program().to_string(),
            depth: cli.depth.unwrap_or_else(|| self.depth()),
            omit_dev: cli.omit_dev || self.omit_dev(),
            quiet: cli.quiet || self.output.quiet.unwrap_or(false),
            json: cli.json || self.output.json.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert_eq!(config.npm_program(), "npm");
        assert_eq!(config.depth(), 20);
        assert!(!config.omit_dev());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let config = GlobalConfig::load_from_path(&config_path).unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let content = r#"
[npm]
program = "/opt/node/bin/npm"

[diff]
depth = 5
omit_dev = true
"#;
        fs::write(&config_path, content).unwrap();

        let config = GlobalConfig::load_from_path(&config_path).unwrap();
        assert_eq!(config.npm_program(), "/opt/node/bin/npm");
        assert_eq!(config.depth(), 5);
        assert!(config.omit_dev());
        assert_eq!(config.output.quiet, None);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        fs::write(&config_path, "invalid toml [[[").unwrap();

        let result = GlobalConfig::load_from_path(&config_path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_through_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let dirs = AppDirs::with_config_dir(temp_dir.path());
        fs::write(dirs.global_config_path(), "[output]\nquiet = true\n").unwrap();

        let config = GlobalConfig::load(&dirs).unwrap();
        assert_eq!(config.output.quiet, Some(true));
    }

    #[test]
    fn test_cli_depth_overrides_file() {
        let config = GlobalConfig {
            diff: DiffConfig {
                depth: Some(3),
                omit_dev: None,
            },
            ..GlobalConfig::default()
        };

        let from_file = config.resolve(CliOverrides::default());
        assert_eq!(from_file.depth, 3);

        let from_cli = config.resolve(CliOverrides {
            depth: Some(7),
            ..CliOverrides::default()
        });
        assert_eq!(from_cli.depth, 7);
    }

    #[test]
    fn test_flags_and_file_combine() {
        let config = GlobalConfig {
            diff: DiffConfig {
                depth: None,
                omit_dev: Some(true),
            },
            ..GlobalConfig::default()
        };

        let effective = config.resolve(CliOverrides {
            json: true,
            ..CliOverrides::default()
        });
        assert!(effective.omit_dev);
        assert!(effective.json);
        assert!(!effective.quiet);
        assert_eq!(effective.depth, 20);
        assert_eq!(effective.npm_program, "npm");
    }
}
