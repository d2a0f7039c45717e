//! Recursive dependency tree diff
//!
//! Compares two snapshots level by level and emits one [`ChangeRecord`] per
//! package visited. Packages present in both snapshots are always emitted
//! (even with identical versions) and recursed into; packages that only exist
//! on one side are emitted once and summarized by their direct dependency
//! count, without descending into their children.
//!
//! Ordering at every level: packages only present in the new snapshot come
//! first (in new snapshot order), followed by the old snapshot's packages in
//! old snapshot order, each immediately followed by its own subtree's records.

use std::cmp::Ordering;

use serde::Serialize;

use crate::core::snapshot::{PackageNode, Snapshot};

/// Classification of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Only present in the new snapshot
    Added,
    /// Only present in the old snapshot
    Removed,
    /// Present in both, version differs
    Updated,
    /// Present in both, same version
    Unchanged,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Updated => write!(f, "updated"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Semver classification of a version update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionChange {
    Major,
    Minor,
    Patch,
    Prerelease,
    /// Only the build metadata differs
    Build,
    Downgrade,
    /// One of the versions is not valid semver
    Unparsed,
}

impl VersionChange {
    /// Classify the move from `previous` to `new`
    pub fn classify(previous: &str, new: &str) -> Self {
        let (Ok(prev), Ok(next)) = (semver::Version::parse(previous), semver::Version::parse(new))
        else {
            return Self::Unparsed;
        };

        if next.cmp_precedence(&prev) == Ordering::Less {
            Self::Downgrade
        } else if next.major != prev.major {
            Self::Major
        } else if next.minor != prev.minor {
            Self::Minor
        } else if next.patch != prev.patch {
            Self::Patch
        } else if next.pre != prev.pre {
            Self::Prerelease
        } else {
            Self::Build
        }
    }
}

/// One difference (or non-difference) between two snapshots for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    /// Package name
    pub package_name: String,
    /// Names from the root down to this package's parent
    pub ancestor_path: Vec<String>,
    /// Size of the package's own dependency map in the snapshot it was taken from
    pub direct_dependency_count: usize,
    /// Package only exists in the new snapshot
    pub added: bool,
    /// Package only exists in the old snapshot
    pub removed: bool,
    /// Version in the old snapshot
    pub previous_version: Option<String>,
    /// Version in the new snapshot
    pub new_version: Option<String>,
}

impl ChangeRecord {
    fn added(name: &str, ancestor_path: &[String], node: &PackageNode) -> Self {
        Self {
            package_name: name.to_string(),
            ancestor_path: ancestor_path.to_vec(),
            direct_dependency_count: node.direct_dependency_count(),
            added: true,
            removed: false,
            previous_version: None,
            new_version: Some(node.version.clone()),
        }
    }

    fn removed(name: &str, ancestor_path: &[String], node: &PackageNode) -> Self {
        Self {
            package_name: name.to_string(),
            ancestor_path: ancestor_path.to_vec(),
            direct_dependency_count: node.direct_dependency_count(),
            added: false,
            removed: true,
            previous_version: Some(node.version.clone()),
            new_version: None,
        }
    }

    fn compared(
        name: &str,
        ancestor_path: &[String],
        old: &PackageNode,
        new: &PackageNode,
    ) -> Self {
        Self {
            package_name: name.to_string(),
            ancestor_path: ancestor_path.to_vec(),
            direct_dependency_count: old.direct_dependency_count(),
            added: false,
            removed: false,
            previous_version: Some(old.version.clone()),
            new_version: Some(new.version.clone()),
        }
    }

    /// What happened to the package
    pub fn kind(&self) -> ChangeKind {
        if self.added {
            ChangeKind::Added
        } else if self.removed {
            ChangeKind::Removed
        } else if self.previous_version == self.new_version {
            ChangeKind::Unchanged
        } else {
            ChangeKind::Updated
        }
    }

    /// Whether the record carries anything worth reporting
    pub fn is_change(&self) -> bool {
        self.kind() != ChangeKind::Unchanged
    }

    /// Depth in the tree (0 for top-level packages)
    pub fn depth(&self) -> usize {
        self.ancestor_path.len()
    }

    /// Full path from the root down to and including this package
    pub fn breadcrumb(&self) -> Vec<&str> {
        self.ancestor_path
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.package_name.as_str()))
            .collect()
    }

    /// Semver classification for updated packages
    pub fn version_change(&self) -> Option<VersionChange> {
        match (self.kind(), &self.previous_version, &self.new_version) {
            (ChangeKind::Updated, Some(previous), Some(new)) => {
                Some(VersionChange::classify(previous, new))
            }
            _ => None,
        }
    }
}

/// Diff two whole-tree snapshots
pub fn diff_snapshots(old: &Snapshot, new: &Snapshot) -> Vec<ChangeRecord> {
    diff(Some(old), Some(new), &[])
}

/// Diff two dependency sets located at `ancestor_path`
///
/// An absent `old` behaves like an empty one: every entry of `new` is
/// reported as added.
pub fn diff(
    old: Option<&Snapshot>,
    new: Option<&Snapshot>,
    ancestor_path: &[String],
) -> Vec<ChangeRecord> {
    let mut records = Vec::new();
    let mut path = ancestor_path.to_vec();
    diff_level(old, new, &mut path, &mut records);
    records
}

fn diff_level(
    old: Option<&Snapshot>,
    new: Option<&Snapshot>,
    path: &mut Vec<String>,
    records: &mut Vec<ChangeRecord>,
) {
    let old = match old {
        Some(old) if !old.is_empty() => old,
        _ => {
            for (name, node) in new.into_iter().flatten() {
                records.push(ChangeRecord::added(name, path, node));
            }
            return;
        }
    };

    // Additions at this level go before anything from the old side
    for (name, node) in new.into_iter().flatten() {
        if !old.contains_key(name) {
            records.push(ChangeRecord::added(name, path, node));
        }
    }

    for (name, old_node) in old {
        tracing::trace!("Looking at package: {}", {
            let mut full = path.clone();
            full.push(name.clone());
            full.join(" -> ")
        });

        let Some(new_node) = new.and_then(|new| new.get(name)) else {
            records.push(ChangeRecord::removed(name, path, old_node));
            continue;
        };

        records.push(ChangeRecord::compared(name, path, old_node, new_node));

        path.push(name.clone());
        diff_level(
            old_node.dependencies.as_ref(),
            new_node.dependencies.as_ref(),
            path,
            records,
        );
        path.pop();
    }
}
