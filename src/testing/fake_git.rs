use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::Git;

/// Records every git call; remote state is configured up front.
pub struct FakeGit {
    pub identity: bool,
    pub main_exists: bool,
    pub dirty_after_generate: bool,
    pub clone_fails: bool,
    pub calls: Mutex<Vec<String>>,
    pub cloned_into: Mutex<Option<PathBuf>>,
}

impl Default for FakeGit {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGit {
    pub fn new() -> Self {
        Self {
            identity: true,
            main_exists: false,
            dirty_after_generate: true,
            clone_fails: false,
            calls: Mutex::new(Vec::new()),
            cloned_into: Mutex::new(None),
        }
    }

    pub fn with_main(mut self) -> Self {
        self.main_exists = true;
        self
    }

    pub fn clean(mut self) -> Self {
        self.dirty_after_generate = false;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Git for FakeGit {
    fn has_global_identity(&self) -> Result<bool, AppError> {
        Ok(self.identity)
    }

    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), AppError> {
        self.record(format!("clone {url}"));
        if self.clone_fails {
            return Err(AppError::CloningRepo { details: "repository not found".into() });
        }
        std::fs::create_dir_all(dest)?;
        *self.cloned_into.lock().unwrap() = Some(dest.to_path_buf());
        Ok(())
    }

    fn remote_branch_exists(&self, _repo: &Path, branch: &str) -> Result<bool, AppError> {
        self.record(format!("ls-remote {branch}"));
        Ok(self.main_exists)
    }

    fn rename_current_branch(&self, _repo: &Path, name: &str) -> Result<(), AppError> {
        self.record(format!("rename {name}"));
        Ok(())
    }

    fn create_branch(&self, _repo: &Path, name: &str, start_point: &str) -> Result<(), AppError> {
        self.record(format!("branch {name} {start_point}"));
        Ok(())
    }

    fn stage_all(&self, _repo: &Path) -> Result<(), AppError> {
        self.record("add".to_string());
        Ok(())
    }

    fn commit(&self, _repo: &Path, message: &str) -> Result<(), AppError> {
        self.record(format!("commit {message}"));
        Ok(())
    }

    fn push(&self, _repo: &Path, branch: &str) -> Result<(), AppError> {
        self.record(format!("push {branch}"));
        Ok(())
    }

    fn has_uncommitted_changes(&self, _repo: &Path) -> Result<bool, AppError> {
        self.record("status".to_string());
        Ok(self.dirty_after_generate)
    }
}
