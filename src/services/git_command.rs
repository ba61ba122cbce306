use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::domain::AppError;
use crate::domain::remote_url;
use crate::ports::Git;

/// `git` subprocess adapter. Arguments are passed as vectors, never through a shell.
#[derive(Debug, Clone, Default)]
pub struct GitCommandAdapter {
    envs: Vec<(OsString, OsString)>,
}

impl GitCommandAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra environment for every invocation (e.g. `GIT_CONFIG_GLOBAL`).
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    fn output(&self, args: &[&str], cwd: Option<&Path>) -> Result<Output, AppError> {
        let mut command = Command::new("git");
        command.args(args);
        command.envs(self.envs.iter().map(|(k, v)| (k, v)));
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        tracing::debug!(command = %display_command(args), "Running git");
        command.output().map_err(|e| AppError::GitError {
            command: display_command(args),
            details: e.to_string(),
        })
    }

    fn run(&self, args: &[&str], cwd: &Path) -> Result<String, AppError> {
        let output = self.output(args, Some(cwd))?;
        if !output.status.success() {
            return Err(AppError::GitError {
                command: display_command(args),
                details: stderr_or_unknown(&output),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn global_config(&self, key: &str) -> Result<Option<String>, AppError> {
        let output = self.output(&["config", "--global", key], None)?;
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        // `git config` exits 1 when the key is unset.
        Ok((output.status.success() && !value.is_empty()).then_some(value))
    }
}

fn display_command(args: &[&str]) -> String {
    let redacted: Vec<String> = args.iter().map(|arg| remote_url::redact(arg)).collect();
    format!("git {}", redacted.join(" "))
}

fn stderr_or_unknown(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() { "Unknown error".to_string() } else { stderr }
}

impl Git for GitCommandAdapter {
    fn has_global_identity(&self) -> Result<bool, AppError> {
        Ok(self.global_config("user.name")?.is_some() && self.global_config("user.email")?.is_some())
    }

    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), AppError> {
        let dest_arg = dest.to_string_lossy();
        let parent: PathBuf =
            dest.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        let output = self.output(&["clone", url, &dest_arg], Some(&parent))?;
        if !output.status.success() {
            return Err(AppError::CloningRepo {
                details: remote_url::redact_in_text(&stderr_or_unknown(&output), url),
            });
        }
        Ok(())
    }

    fn remote_branch_exists(&self, repo: &Path, branch: &str) -> Result<bool, AppError> {
        let stdout = self.run(&["ls-remote", "--heads", "origin", branch], repo)?;
        Ok(!stdout.is_empty())
    }

    fn rename_current_branch(&self, repo: &Path, name: &str) -> Result<(), AppError> {
        self.run(&["branch", "-M", name], repo).map(|_| ())
    }

    fn create_branch(&self, repo: &Path, name: &str, start_point: &str) -> Result<(), AppError> {
        self.run(&["checkout", "-b", name, start_point], repo).map(|_| ())
    }

    fn stage_all(&self, repo: &Path) -> Result<(), AppError> {
        self.run(&["add", "--all"], repo).map(|_| ())
    }

    fn commit(&self, repo: &Path, message: &str) -> Result<(), AppError> {
        self.run(&["commit", "-m", message], repo).map(|_| ())
    }

    fn push(&self, repo: &Path, branch: &str) -> Result<(), AppError> {
        self.run(&["push", "-u", "origin", branch], repo).map(|_| ())
    }

    fn has_uncommitted_changes(&self, repo: &Path) -> Result<bool, AppError> {
        let stdout = self.run(&["status", "--porcelain"], repo)?;
        Ok(!stdout.is_empty())
    }
}
