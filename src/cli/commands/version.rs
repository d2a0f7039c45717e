//! CLI command for `npm-with-diff npm-version`

use anyhow::{Context, Result};

use crate::cli::output::OutputConfig;
use crate::core::global_config::EffectiveConfig;
use crate::infra::npm::{NpmProcess, NpmRunner};

/// Print the version of the configured npm
pub async fn execute(config: &EffectiveConfig) -> Result<()> {
    let npm = NpmProcess::locate(&config.npm_program)?;
    let version = npm.version().await.context("Failed to query npm version")?;

    if OutputConfig::global().json {
        println!(
            "{}",
            serde_json::json!({ "npm": npm.program().display().to_string(), "version": version })
        );
    } else {
        println!("{version}");
    }

    Ok(())
}
