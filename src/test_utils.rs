//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::snapshot::{PackageNode, Snapshot};

    /// Generate a valid npm package name (lowercase alphanumeric with hyphens)
    pub fn package_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,12}[a-z0-9]?".prop_filter("Name must not be empty", |s| !s.is_empty())
    }

    /// Generate a valid semver version string
    pub fn semver_version() -> impl Strategy<Value = String> {
        (0u32..5, 0u32..20, 0u32..20)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }

    /// Generate a package node with up to `depth` levels of dependencies
    pub fn package_node(depth: u32) -> impl Strategy<Value = PackageNode> {
        let leaf = semver_version().prop_map(PackageNode::new);
        leaf.prop_recursive(depth, 48, 4, |inner| {
            (
                semver_version(),
                prop::collection::vec((package_name(), inner), 0..4),
            )
                .prop_map(|(version, children)| {
                    let mut node = PackageNode::new(version);
                    if !children.is_empty() {
                        node.dependencies = Some(children.into_iter().collect());
                    }
                    node
                })
        })
    }

    /// Generate a snapshot of up to five top-level packages
    pub fn snapshot() -> impl Strategy<Value = Snapshot> {
        prop::collection::vec((package_name(), package_node(3)), 0..5)
            .prop_map(|entries| entries.into_iter().collect())
    }

    /// Find the node at `breadcrumb` (root name first)
    pub fn lookup<'a>(snapshot: &'a Snapshot, breadcrumb: &[&str]) -> Option<&'a PackageNode> {
        let (first, rest) = breadcrumb.split_first()?;
        let mut node = snapshot.get(*first)?;
        for name in rest {
            node = node.dependencies.as_ref()?.get(*name)?;
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::core::snapshot::count_packages;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_package_name_generator(name in package_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn test_semver_version_generator(version in semver_version()) {
            prop_assert!(semver::Version::parse(&version).is_ok());
        }

        #[test]
        fn test_lookup_finds_every_top_level_package(snapshot in snapshot()) {
            for name in snapshot.keys() {
                prop_assert!(lookup(&snapshot, &[name.as_str()]).is_some());
            }
            prop_assert!(count_packages(&snapshot) >= snapshot.len());
        }
    }
}
