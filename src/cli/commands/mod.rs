//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod run;
pub mod version;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::defaults::UPDATE_COMMAND;
use crate::core::global_config::EffectiveConfig;
use crate::infra::dirs::AppDirs;

/// Flags controlling the dependency snapshots
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DiffArgs {
    /// Depth of the dependency tree to compare
    #[arg(long, value_name = "N")]
    pub depth: Option<u32>,

    /// Leave dev dependencies out of the diff
    #[arg(long)]
    pub omit_dev: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run any npm command and show the dependency changes it caused
    Run {
        /// npm command to run (e.g. install, update, dedupe)
        command: String,

        /// Arguments passed to the npm command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,

        /// Run even if npm does not list the command
        #[arg(short, long)]
        force: bool,

        #[command(flatten)]
        diff: DiffArgs,
    },

    /// Run `npm update` and show the dependency changes it caused
    Update {
        /// Arguments passed to `npm update`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,

        #[command(flatten)]
        diff: DiffArgs,
    },

    /// Print the version of the npm being used
    NpmVersion,

    /// Show the effective configuration
    Config,
}

impl Commands {
    /// Depth given on the command line, if any
    pub fn depth(&self) -> Option<u32> {
        match self {
            Self::Run { diff, .. } | Self::Update { diff, .. } => diff.depth,
            Self::NpmVersion | Self::Config => None,
        }
    }

    /// Whether `--omit-dev` was given
    pub fn omit_dev(&self) -> bool {
        match self {
            Self::Run { diff, .. } | Self::Update { diff, .. } => diff.omit_dev,
            Self::NpmVersion | Self::Config => false,
        }
    }

    /// Execute the command
    pub async fn run(self, dirs: &AppDirs, effective: &EffectiveConfig) -> Result<()> {
        match self {
            Self::Run {
                command,
                args,
                force,
                diff: _,
            } => run::execute(effective, command, args, force).await,
            // `update` is always a valid npm command, no need to look it up
            Self::Update { args, diff: _ } => {
                run::execute(effective, UPDATE_COMMAND.to_string(), args, true).await
            }
            Self::NpmVersion => version::execute(effective).await,
            Self::Config => config::execute(dirs, effective),
        }
    }
}
