//! Default configuration values

/// npm executable looked up on PATH
pub const DEFAULT_NPM_PROGRAM: &str = "npm";

/// Depth passed to `npm ls` when collecting snapshots
pub const DEFAULT_TREE_DEPTH: u32 = 20;

/// Whether dev dependencies are left out of the diff
pub const DEFAULT_OMIT_DEV: bool = false;

/// Command run by the `update` shorthand
pub const UPDATE_COMMAND: &str = "update";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
