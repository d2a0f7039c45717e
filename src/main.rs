//! npm-with-diff CLI
//!
//! Entry point for the npm-with-diff command-line application.

use anyhow::Result;
use clap::Parser;

use npm_with_diff::cli::output::{display_error, OutputConfig};
use npm_with_diff::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for the report
    let level = OutputConfig::new(cli.quiet, cli.json, cli.verbose).log_level();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
