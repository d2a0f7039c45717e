//! Core business logic module
//!
//! The diff and report logic here is pure. Process I/O belongs in
//! [`crate::infra`]; [`run`] only drives it through the
//! [`crate::infra::npm::NpmRunner`] trait.
//!
//! # Submodules
//!
//! - [`snapshot`] - Dependency tree snapshots and `npm ls --json` parsing
//! - [`diff`] - Recursive tree diff producing change records
//! - [`report`] - Text report and summary of change records
//! - [`commands`] - npm command discovery
//! - [`run`] - Snapshot, run, snapshot, diff
//! - [`global_config`] - Global configuration management

pub mod commands;
pub mod diff;
pub mod global_config;
pub mod report;
pub mod run;
pub mod snapshot;
