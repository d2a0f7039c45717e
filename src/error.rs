//! Error types for npm-with-diff
//!
//! Domain-specific error types using thiserror. The diff core itself is
//! total and defines none; everything here belongs to the npm process
//! boundary and configuration loading.

use thiserror::Error;

/// Errors raised while talking to npm
#[derive(Error, Debug)]
pub enum NpmError {
    /// npm executable could not be located
    #[error("npm executable '{program}' not found: {error}")]
    NotFound { program: String, error: String },

    /// Process could not be started
    #[error("Error running npm process for \"npm {command}\": {error}")]
    Spawn { command: String, error: String },

    /// Process exited with a non-zero status
    #[error(
        "Error running \"npm {command}\" (code {}): {stderr}",
        .code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
    )]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Dependency listing was not valid JSON
    #[error("Failed to parse output of \"npm {command}\": {error}")]
    InvalidListing { command: String, error: String },

    /// Command is not a known npm command
    #[error("Couldn't find an npm command with name \"{command}\". If you're sure it exists, run again with \"-f\" option.")]
    UnknownCommand { command: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },
}
