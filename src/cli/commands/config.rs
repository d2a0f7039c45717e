//! CLI command for `npm-with-diff config`
//!
//! Prints where the config file lives and the settings in effect.

use anyhow::{Context, Result};

use crate::cli::output::{status, OutputConfig};
use crate::core::global_config::EffectiveConfig;
use crate::infra::dirs::AppDirs;

/// Execute config command
pub fn execute(dirs: &AppDirs, config: &EffectiveConfig) -> Result<()> {
    let path = dirs.global_config_path();

    if OutputConfig::global().json {
        let document = serde_json::json!({
            "config_file": path.display().to_string(),
            "config_file_exists": path.exists(),
            "effective": config,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&document).context("Failed to serialize configuration")?
        );
        return Ok(());
    }

    if path.exists() {
        println!("{} Config file: {}", status::SUCCESS, path.display());
    } else {
        println!("{} No config file at {} (using defaults)", status::WARNING, path.display());
    }
    println!();

    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{rendered}");

    Ok(())
}
