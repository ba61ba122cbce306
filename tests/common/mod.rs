//! Shared testing utilities for scm-setup integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;

/// Isolated HOME and work directory for CLI invocations.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        root.child("work").create_dir_all().expect("Failed to create work directory");
        Self { root }
    }

    pub fn home(&self) -> &Path {
        self.root.path()
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    /// Command for the compiled binary, run inside the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("scm-setup").expect("Failed to locate scm-setup binary");
        cmd.current_dir(self.work_dir()).env("HOME", self.home()).env_remove("RUST_LOG");
        cmd
    }

    pub fn write_metadata(&self, content: &str) -> PathBuf {
        let file = self.root.child("work/metadata.json");
        file.write_str(content).expect("Failed to write metadata");
        file.path().to_path_buf()
    }

    pub fn write_config(&self, content: &str) -> PathBuf {
        let file = self.root.child("work/scm-setup.toml");
        file.write_str(content).expect("Failed to write config");
        file.path().to_path_buf()
    }

    pub fn read_work_file(&self, name: &str) -> String {
        fs::read_to_string(self.work_dir().join(name)).expect("Failed to read work file")
    }
}

/// Run git with an isolated global config, panicking on failure.
#[allow(dead_code)]
pub fn git(global_config: &Path, cwd: &Path, args: &[&str]) -> String {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_CONFIG_GLOBAL", global_config)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
