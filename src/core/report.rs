//! Human-readable diff report
//!
//! Turns the flat list of [`ChangeRecord`]s into one text block per changed
//! package. Nested packages carry a breadcrumb with the package itself
//! starred, e.g. `c (a -> b -> *c*)`.

use std::fmt::Write;

use serde::Serialize;

use crate::core::diff::{ChangeKind, ChangeRecord, VersionChange};

/// Which part of the dependency tree a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyScope {
    /// Dev and production dependencies
    #[default]
    All,
    /// Production dependencies only
    NonDev,
}

impl DependencyScope {
    /// Scope matching the `omit dev` setting
    pub fn from_omit_dev(omit_dev: bool) -> Self {
        if omit_dev {
            Self::NonDev
        } else {
            Self::All
        }
    }

    /// Qualifier inserted before "dependencies" in messages
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "",
            Self::NonDev => "non-dev ",
        }
    }
}

/// Renders change records as text
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffReporter {
    scope: DependencyScope,
}

impl DiffReporter {
    /// Create a reporter for the given scope
    pub fn new(scope: DependencyScope) -> Self {
        Self { scope }
    }

    /// Message used when nothing changed
    pub fn nothing_changed(&self) -> String {
        format!("No {}dependencies were changed!", self.scope.label())
    }

    /// Render all records that describe an actual change
    pub fn render(&self, records: &[ChangeRecord]) -> String {
        let blocks: Vec<String> = records.iter().filter_map(render_record).collect();

        if blocks.is_empty() {
            self.nothing_changed()
        } else {
            blocks.join("\n")
        }
    }
}

/// Render one record, or nothing for an unchanged package
fn render_record(record: &ChangeRecord) -> Option<String> {
    let heading = if record.ancestor_path.is_empty() {
        record.package_name.clone()
    } else {
        format!(
            "{} ({} -> *{}*)",
            record.package_name,
            record.ancestor_path.join(" -> "),
            record.package_name
        )
    };

    let details = match record.kind() {
        ChangeKind::Added => format!(
            "\t* Was added.\n\t* Has {} direct dependencies (not listed here).",
            record.direct_dependency_count
        ),
        ChangeKind::Removed => format!(
            "\t* Was removed.\n\t* Had {} direct dependencies (not listed here).",
            record.direct_dependency_count
        ),
        ChangeKind::Updated => format!(
            "\t* Was updated.\n\t* {} => {}",
            record.previous_version.as_deref().unwrap_or_default(),
            record.new_version.as_deref().unwrap_or_default()
        ),
        ChangeKind::Unchanged => return None,
    };

    Some(format!("{heading}\n{details}"))
}

/// Counts of the changes in a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub updated: usize,
    /// Updates that moved to a lower version
    pub downgraded: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    /// Tally a list of records
    pub fn from_records(records: &[ChangeRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            match record.kind() {
                ChangeKind::Added => summary.added += 1,
                ChangeKind::Removed => summary.removed += 1,
                ChangeKind::Updated => {
                    summary.updated += 1;
                    if record.version_change() == Some(VersionChange::Downgrade) {
                        summary.downgraded += 1;
                    }
                }
                ChangeKind::Unchanged => summary.unchanged += 1,
            }
        }
        summary
    }

    /// Number of reported changes
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.updated
    }

    /// One-line summary
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "{} added, {} removed, {} updated",
            self.added, self.removed, self.updated
        );
        if self.downgraded > 0 {
            let _ = write!(line, " ({} downgraded)", self.downgraded);
        }
        let _ = write!(line, ", {} unchanged", self.unchanged);
        line
    }
}
