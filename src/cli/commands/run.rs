//! CLI implementation for `npm-with-diff run` and `npm-with-diff update`
//!
//! Prints progress while the snapshots are collected, then the command's
//! own output followed by the dependency changes.

use anyhow::{Context, Result};
use indicatif::ProgressBar;

use crate::cli::output::{create_spinner, progress, status, OutputConfig};
use crate::core::global_config::EffectiveConfig;
use crate::core::run::{run_with_diff, RunRequest};
use crate::infra::npm::NpmProcess;

/// Execute an npm command with a dependency diff
pub async fn execute(
    config: &EffectiveConfig,
    command: String,
    args: Vec<String>,
    force: bool,
) -> Result<()> {
    let npm = NpmProcess::locate(&config.npm_program)?;

    let request = RunRequest {
        command,
        arguments: args,
        depth: config.depth,
        omit_dev: config.omit_dev,
        force,
    };

    let mut spinner: Option<ProgressBar> = None;
    let result = run_with_diff(&npm, &request, |stage| {
        if let Some(previous) = spinner.take() {
            previous.finish_and_clear();
        }
        let message = stage.message(&request);
        progress(&message);
        spinner = Some(create_spinner(&message));
    })
    .await;

    if let Some(last) = spinner.take() {
        last.finish_and_clear();
    }

    let outcome =
        result.with_context(|| format!("Failed to run \"npm {}\"", request.command_line()))?;
    let output = OutputConfig::global();

    if output.json {
        println!("{}", outcome.to_json().context("Failed to serialize diff")?);
        return Ok(());
    }

    progress(&outcome.finished_message());
    progress(outcome.command_output.trim_end());

    if output.shows_progress() {
        println!("{}", outcome.changes_heading());
    }
    println!("{}", outcome.report());

    if output.verbose > 0 {
        let summary = outcome.summary();
        let prefix = if summary.downgraded > 0 {
            status::WARNING
        } else {
            status::SUCCESS
        };
        eprintln!("{prefix} {}", summary.format_line());
    }

    Ok(())
}
