//! npm process boundary
//!
//! Everything that spawns npm lives here. [`NpmRunner`] abstracts the raw
//! invocation so the orchestration can be exercised without a real npm; the
//! higher-level operations (listing the dependency tree, running a command,
//! discovering commands) are provided methods built on top of it.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::core::commands::parse_available_commands;
use crate::core::snapshot::{PackageListing, Snapshot};
use crate::error::NpmError;

/// Captured result of one npm invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NpmOutput {
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Whether the process exited successfully
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl NpmOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Invokes npm with a list of arguments
#[allow(async_fn_in_trait)]
pub trait NpmRunner {
    /// Run `npm <args...>` to completion and capture its output
    async fn exec(&self, args: &[String]) -> Result<NpmOutput, NpmError>;

    /// Run an npm command, failing on a non-zero exit status
    ///
    /// Returns the command's stdout. Stderr from a successful run (npm
    /// prints warnings there) is logged, not treated as an error.
    async fn run_command(&self, command: &str, arguments: &[String]) -> Result<String, NpmError> {
        let mut args = Vec::with_capacity(arguments.len() + 1);
        if !command.is_empty() {
            args.push(command.to_string());
        }
        args.extend(arguments.iter().cloned());

        let output = self.exec(&args).await?;
        let shown = args.join(" ");

        if !output.success {
            return Err(NpmError::Failed {
                command: shown,
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        if !output.stderr.trim().is_empty() {
            tracing::warn!("npm {shown}: {}", output.stderr.trim());
        }

        Ok(output.stdout)
    }

    /// Installed npm version (`npm -v`)
    async fn version(&self) -> Result<String, NpmError> {
        let stdout = self.run_command("-v", &[]).await?;
        Ok(stdout.trim().to_string())
    }

    /// Resolved dependency tree (`npm ls --all --json`)
    ///
    /// `npm ls` exits non-zero when the tree has problems (missing or invalid
    /// packages) but still prints the full tree, so a non-zero exit is only
    /// fatal when nothing was printed.
    async fn dependency_tree(&self, depth: u32, omit_dev: bool) -> Result<Snapshot, NpmError> {
        let mut args = vec![
            "ls".to_string(),
            "--all".to_string(),
            "--json".to_string(),
            format!("--depth={depth}"),
        ];
        if omit_dev {
            args.push("--omit=dev".to_string());
        }

        let output = self.exec(&args).await?;
        let shown = args.join(" ");

        if output.stdout.trim().is_empty() {
            return Err(NpmError::Failed {
                command: shown,
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        if !output.success {
            tracing::warn!(
                "npm {shown} reported problems with the dependency tree: {}",
                output.stderr.trim()
            );
        }

        let listing =
            PackageListing::from_json(&output.stdout).map_err(|e| NpmError::InvalidListing {
                command: shown,
                error: e.to_string(),
            })?;

        Ok(listing.into_snapshot())
    }

    /// Command names listed by `npm help`
    async fn available_commands(&self) -> Result<Vec<String>, NpmError> {
        let stdout = self.run_command("help", &[]).await?;
        Ok(parse_available_commands(&stdout))
    }
}

/// Runs the real npm executable
#[derive(Debug, Clone)]
pub struct NpmProcess {
    program: PathBuf,
}

impl NpmProcess {
    /// Wrap an npm executable path without checking it
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve `program` on PATH (or as a path)
    pub fn locate(program: &str) -> Result<Self, NpmError> {
        let path = which::which(program).map_err(|e| NpmError::NotFound {
            program: program.to_string(),
            error: e.to_string(),
        })?;
        tracing::debug!("Using npm at {}", path.display());
        Ok(Self::new(path))
    }

    /// Path of the npm executable
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl NpmRunner for NpmProcess {
    async fn exec(&self, args: &[String]) -> Result<NpmOutput, NpmError> {
        tracing::debug!("Running: npm {}", args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| NpmError::Spawn {
                command: args.join(" "),
                error: e.to_string(),
            })?;

        tracing::debug!("npm {} exited with {}", args.join(" "), output.status);

        Ok(NpmOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
