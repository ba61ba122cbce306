use std::path::Path;

use crate::domain::AppError;

/// Git operations the orchestrator needs. Every call names its repository
/// directory explicitly; the process working directory is never changed.
pub trait Git {
    /// Whether global `user.name` and `user.email` are both configured.
    fn has_global_identity(&self) -> Result<bool, AppError>;

    /// Clone `url` into `dest`. Failure maps to `AppError::CloningRepo`.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), AppError>;

    /// Check whether `origin` has a branch named `branch`.
    fn remote_branch_exists(&self, repo: &Path, branch: &str) -> Result<bool, AppError>;

    /// Rename the current (possibly unborn) branch.
    fn rename_current_branch(&self, repo: &Path, name: &str) -> Result<(), AppError>;

    /// Create and check out `name` starting at `start_point`.
    fn create_branch(&self, repo: &Path, name: &str, start_point: &str) -> Result<(), AppError>;

    /// Stage every change in the working tree.
    fn stage_all(&self, repo: &Path) -> Result<(), AppError>;

    fn commit(&self, repo: &Path, message: &str) -> Result<(), AppError>;

    /// Push `branch` to `origin`, setting upstream.
    fn push(&self, repo: &Path, branch: &str) -> Result<(), AppError>;

    /// Whether `git status --porcelain` reports anything.
    fn has_uncommitted_changes(&self, repo: &Path) -> Result<bool, AppError>;
}
