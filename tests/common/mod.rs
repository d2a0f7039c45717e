//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests: a temporary
//! project with a fake `npm` script and helpers to run the binary against it.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory holding a fake npm executable, its canned
/// outputs and a config directory pointing at it.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Path of the fake npm script
    pub fn npm_path(&self) -> PathBuf {
        self.dir.path().join("bin").join("npm")
    }

    /// Install a fake npm that serves `before` from `npm ls` until a mutating
    /// command ran, and `after` from then on
    #[cfg(unix)]
    pub fn install_fake_npm(&self, before: &str, after: &str) {
        use std::os::unix::fs::PermissionsExt;

        self.create_file("bin/before.json", before);
        self.create_file("bin/after.json", after);
        self.create_file("bin/help.txt", NPM_HELP);
        self.create_file("bin/npm", FAKE_NPM);

        let npm = self.npm_path();
        let mut permissions = std::fs::metadata(&npm)
            .expect("Failed to stat fake npm")
            .permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(&npm, permissions).expect("Failed to make fake npm executable");

        self.write_config("");
    }

    /// Write `config.toml` pointing at the fake npm, plus extra TOML
    pub fn write_config(&self, extra: &str) {
        let config = format!(
            "[npm]\nprogram = \"{}\"\n\n{extra}",
            self.npm_path().display()
        );
        self.create_file("config/config.toml", &config);
    }

    /// Arguments the fake npm was called with, one invocation per line
    pub fn npm_calls(&self) -> Vec<String> {
        if !self.file_exists("bin/calls.log") {
            return Vec::new();
        }
        self.read_file("bin/calls.log")
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    /// Run the npm-with-diff binary inside the project
    pub fn run(&self, args: &[&str]) -> std::process::Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_npm-with-diff"));
        cmd.current_dir(self.path());
        cmd.env("NPM_WITH_DIFF_CONFIG_DIR", self.dir.path().join("config"));
        cmd.env_remove("RUST_LOG");
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute npm-with-diff")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Fake npm: logs its arguments and answers from files next to it
pub const FAKE_NPM: &str = r#"#!/bin/sh
DIR="$(cd "$(dirname "$0")" && pwd)"
echo "$*" >> "$DIR/calls.log"
case "$1" in
  -v)
    echo "10.2.4"
    ;;
  help)
    cat "$DIR/help.txt"
    ;;
  ls)
    if [ -f "$DIR/mutated" ]; then cat "$DIR/after.json"; else cat "$DIR/before.json"; fi
    ;;
  update|install|dedupe)
    touch "$DIR/mutated"
    echo "changed 2 packages in 1s"
    ;;
  *)
    echo "npm ERR! Unknown command: \"$1\"" >&2
    exit 1
    ;;
esac
"#;

/// Trimmed `npm help` output
pub const NPM_HELP: &str = "npm <command>

Usage:

npm install        install all the dependencies in your project
npm test           run this project's tests

All commands:

    access, adduser, audit, ci, dedupe, install, ls, update,
    version, whoami

Specify configs in the ini-formatted file:
    /home/user/.npmrc
";

/// `npm ls --json` before the mutation
pub const BEFORE_LISTING: &str = r#"{
  "version": "1.0.0",
  "name": "test-project",
  "dependencies": {
    "package-level-1-1": {
      "version": "1.0.0",
      "dependencies": {
        "package-level-2-1": {
          "version": "1.0.0",
          "dependencies": {
            "package-level-3-1": {
              "version": "1.0.0",
              "dependencies": {
                "package-level-4-1": { "version": "1.0.0" }
              }
            }
          }
        }
      }
    }
  }
}"#;

/// `npm ls --json` after the mutation
pub const AFTER_LISTING: &str = r#"{
  "version": "1.0.0",
  "name": "test-project",
  "dependencies": {
    "package-level-1-1": {
      "version": "1.0.0",
      "dependencies": {
        "package-level-2-1": { "version": "2.0.0" },
        "package-level-2-2": {
          "version": "1.0.0",
          "dependencies": {
            "package-level-3-2": { "version": "1.0.0" }
          }
        }
      }
    },
    "package-level-1-2": {
      "version": "1.0.0",
      "dependencies": {
        "package-level-2-3": { "version": "1.0.0" },
        "package-level-2-4": {
          "version": "1.0.0",
          "dependencies": {
            "package-level-3-3": { "version": "1.0.0" }
          }
        }
      }
    }
  }
}"#;

/// Report expected for `BEFORE_LISTING` -> `AFTER_LISTING`
pub const EXPECTED_REPORT: &str = "package-level-1-2\n\
\t* Was added.\n\
\t* Has 2 direct dependencies (not listed here).\n\
package-level-2-2 (package-level-1-1 -> *package-level-2-2*)\n\
\t* Was added.\n\
\t* Has 1 direct dependencies (not listed here).\n\
package-level-2-1 (package-level-1-1 -> *package-level-2-1*)\n\
\t* Was updated.\n\
\t* 1.0.0 => 2.0.0\n\
package-level-3-1 (package-level-1-1 -> package-level-2-1 -> *package-level-3-1*)\n\
\t* Was removed.\n\
\t* Had 1 direct dependencies (not listed here).";
