//! Dependency tree snapshots
//!
//! A snapshot is the resolved dependency tree of a project at one point in
//! time, in the shape emitted by `npm ls --json`: a mapping of package name
//! to `{version, dependencies?}`. Entry order is preserved as npm emitted it,
//! which determines the order of diff records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name-keyed, insertion-ordered set of packages at one level of the tree
pub type Snapshot = IndexMap<String, PackageNode>;

/// One resolved package in a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageNode {
    /// Resolved version (empty for packages npm reports as missing)
    #[serde(default)]
    pub version: String,

    /// Tarball the package was resolved from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,

    /// Whether the version was forced by an `overrides` entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridden: Option<bool>,

    /// Direct dependencies; `None` when npm listed no children at this depth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Snapshot>,
}

impl PackageNode {
    /// Create a leaf node with the given version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Attach a child dependency, creating the dependency map if needed
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>, node: PackageNode) -> Self {
        self.dependencies
            .get_or_insert_with(Snapshot::new)
            .insert(name.into(), node);
        self
    }

    /// Number of direct dependencies (0 when none are known)
    pub fn direct_dependency_count(&self) -> usize {
        self.dependencies.as_ref().map_or(0, IndexMap::len)
    }
}

/// Root object of `npm ls --json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageListing {
    /// Project name
    #[serde(default)]
    pub name: Option<String>,

    /// Project version
    #[serde(default)]
    pub version: Option<String>,

    /// Top-level dependencies
    #[serde(default)]
    pub dependencies: Option<Snapshot>,
}

impl PackageListing {
    /// Parse the JSON printed by `npm ls --json`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Take the top-level dependency set as a snapshot
    pub fn into_snapshot(self) -> Snapshot {
        self.dependencies.unwrap_or_default()
    }
}

/// Count every package in a snapshot, at every depth
pub fn count_packages(snapshot: &Snapshot) -> usize {
    snapshot
        .values()
        .map(|node| 1 + node.dependencies.as_ref().map_or(0, count_packages))
        .sum()
}
