//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::{Context, Result};
use clap::Parser;

use commands::Commands;

use crate::core::global_config::{CliOverrides, GlobalConfig};
use crate::infra::dirs::AppDirs;
use output::OutputConfig;

/// npm-with-diff - run npm commands and see what changed in the dependency tree
///
/// Collects the dependency tree before and after an npm command and prints
/// which packages were added, removed or updated.
#[derive(Parser, Debug)]
#[command(name = "npm-with-diff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print the final report
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let Some(command) = self.command else {
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            return Ok(());
        };

        let dirs = AppDirs::new();
        let config = GlobalConfig::load(&dirs).context("Failed to load configuration")?;

        let overrides = CliOverrides {
            depth: command.depth(),
            omit_dev: command.omit_dev(),
            quiet: self.quiet,
            json: self.json,
        };
        let effective = config.resolve(overrides);
        tracing::debug!("Effective configuration: {effective:?}");

        OutputConfig::new(effective.quiet, effective.json, self.verbose).apply_global();

        command.run(&dirs, &effective).await
    }
}
