//! Run an npm command and diff the dependency tree around it
//!
//! Sequence: verify the command exists (unless forced), list the tree, run
//! the command, list the tree again, diff the two snapshots. Any npm failure
//! aborts the run before diffing.

use serde::Serialize;

use crate::core::commands::command_line;
use crate::core::diff::{diff_snapshots, ChangeKind, ChangeRecord, VersionChange};
use crate::core::report::{DependencyScope, DiffReporter, DiffSummary};
use crate::core::snapshot::count_packages;
use crate::error::NpmError;
use crate::infra::npm::NpmRunner;

/// What to run and how to snapshot around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// npm command, e.g. `update`
    pub command: String,
    /// Arguments passed after the command
    pub arguments: Vec<String>,
    /// Depth passed to `npm ls`
    pub depth: u32,
    /// Leave dev dependencies out of both snapshots
    pub omit_dev: bool,
    /// Skip checking the command against `npm help`
    pub force: bool,
}

impl RunRequest {
    /// The command as the user would type it after `npm`
    pub fn command_line(&self) -> String {
        command_line(&self.command, &self.arguments)
    }

    /// Scope of the resulting report
    pub fn scope(&self) -> DependencyScope {
        DependencyScope::from_omit_dev(self.omit_dev)
    }
}

/// Long-running steps of a run, reported as they start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    CollectingBefore,
    Running,
    CollectingAfter,
}

impl RunStage {
    /// Progress line for this stage
    pub fn message(self, request: &RunRequest) -> String {
        let line = request.command_line();
        let scope = request.scope().label();
        match self {
            Self::CollectingBefore => {
                format!("Collecting {scope}dependencies (before \"{line}\")...")
            }
            Self::Running => format!("Running command \"{line}\"..."),
            Self::CollectingAfter => {
                format!("Collecting {scope}dependencies (after \"{line}\")...")
            }
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    /// `<command> <args...>`
    pub command_line: String,
    /// Stdout of the command
    pub command_output: String,
    /// Every record produced by the diff, unchanged ones included
    pub records: Vec<ChangeRecord>,
    pub scope: DependencyScope,
}

impl DiffOutcome {
    /// Line printed before the command's output
    pub fn finished_message(&self) -> String {
        format!(
            "Command \"{}\" successfully finished. Command output:",
            self.command_line
        )
    }

    /// Line printed before the report
    pub fn changes_heading(&self) -> String {
        format!(
            "The following {}dependencies were changed:",
            self.scope.label()
        )
    }

    /// Rendered report, or the "nothing changed" message
    pub fn report(&self) -> String {
        DiffReporter::new(self.scope).render(&self.records)
    }

    /// Counts of the changes
    pub fn summary(&self) -> DiffSummary {
        DiffSummary::from_records(&self.records)
    }

    /// Machine-readable form, listing changed records only
    pub fn to_json(&self) -> serde_json::Result<String> {
        let document = JsonOutcome {
            command: &self.command_line,
            omit_dev: self.scope == DependencyScope::NonDev,
            output: &self.command_output,
            summary: self.summary(),
            changes: self
                .records
                .iter()
                .filter(|record| record.is_change())
                .map(|record| JsonChange {
                    kind: record.kind(),
                    version_change: record.version_change(),
                    record,
                })
                .collect(),
        };
        serde_json::to_string_pretty(&document)
    }
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    command: &'a str,
    omit_dev: bool,
    output: &'a str,
    summary: DiffSummary,
    changes: Vec<JsonChange<'a>>,
}

#[derive(Serialize)]
struct JsonChange<'a> {
    kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_change: Option<VersionChange>,
    #[serde(flatten)]
    record: &'a ChangeRecord,
}

/// Run `npm <command>` between two dependency snapshots
///
/// `on_stage` is called as each long-running step starts.
pub async fn run_with_diff<R, F>(
    npm: &R,
    request: &RunRequest,
    mut on_stage: F,
) -> Result<DiffOutcome, NpmError>
where
    R: NpmRunner,
    F: FnMut(RunStage),
{
    if !request.force && !request.command.is_empty() {
        let available = npm.available_commands().await?;
        if !available.iter().any(|c| c == &request.command) {
            return Err(NpmError::UnknownCommand {
                command: request.command.clone(),
            });
        }
    }

    on_stage(RunStage::CollectingBefore);
    let before = npm.dependency_tree(request.depth, request.omit_dev).await?;
    tracing::debug!("Collected {} packages before the command", count_packages(&before));

    on_stage(RunStage::Running);
    let command_output = npm.run_command(&request.command, &request.arguments).await?;
    tracing::info!("Command \"{}\" has run", request.command_line());

    on_stage(RunStage::CollectingAfter);
    let after = npm.dependency_tree(request.depth, request.omit_dev).await?;
    tracing::debug!("Collected {} packages after the command", count_packages(&after));

    let records = diff_snapshots(&before, &after);
    tracing::info!("Diff produced {} records", records.len());

    Ok(DiffOutcome {
        command_line: request.command_line(),
        command_output,
        records,
        scope: request.scope(),
    })
}
