//! Infrastructure layer
//!
//! Handles all I/O operations: external processes and platform directories.
//! This module is the only place where side effects occur.

pub mod dirs;
pub mod npm;
