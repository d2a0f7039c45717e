//! npm-with-diff - run npm commands and report dependency tree changes
//!
//! Collects the resolved dependency tree (`npm ls --json`) before and after
//! an npm command and reports which packages were added, removed or updated,
//! with the path through the tree that leads to each of them.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Snapshot diffing, reporting and run orchestration
//! - [`infra`] - Infrastructure layer (npm processes, directories)
//! - [`config`] - Configuration defaults
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
