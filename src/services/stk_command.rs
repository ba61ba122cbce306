//! `stk` CLI adapter: workspace detection and workflow-file generation.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

use crate::domain::AppError;
use crate::ports::{WorkflowGenerator, WorkflowRequest};

const PLUGIN_ALIAS: &str = "setup-scm";

#[derive(Debug, Clone)]
pub struct StkCommandAdapter {
    binary: String,
    home: Option<PathBuf>,
}

impl StkCommandAdapter {
    /// Use `binary` and resolve the user's home from `HOME`.
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into(), home: std::env::var_os("HOME").map(PathBuf::from) }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// `~/.stk/workspaces/workspace-config.json`, named after the binary stem.
    fn workspace_config_path(&self) -> Option<PathBuf> {
        let stem = Path::new(&self.binary).file_stem()?.to_string_lossy().into_owned();
        let home = self.home.as_ref()?;
        Some(home.join(format!(".{stem}")).join("workspaces").join("workspace-config.json"))
    }

    fn apply_plugin(&self, repo_dir: &Path, request: &WorkflowRequest) -> Result<(), AppError> {
        let mut command = Command::new(&self.binary);
        command
            .arg("apply")
            .arg("plugin")
            .arg(&request.component_path)
            .args(["--skip-warning", "--provider", request.provider.as_str(), "--alias", PLUGIN_ALIAS])
            .current_dir(repo_dir);
        if let Some(use_pool) = request.use_self_hosted_pool {
            command.args(["--use_self_hosted_pool", if use_pool { "true" } else { "false" }]);
        }
        if let Some(pool_name) = &request.self_hosted_pool_name {
            command.arg("--self_hosted_pool_name").arg(pool_name);
        }

        tracing::info!(provider = %request.provider, "Creating workflow files...");
        let status = command.status().map_err(|e| AppError::ExternalTool {
            tool: self.binary.clone(),
            error: e.to_string(),
        })?;
        if !status.success() {
            return Err(AppError::ApplyPluginSetupRepository { code: status.code() });
        }
        Ok(())
    }
}

/// Delete files in `repo_dir` that the provider's templates will regenerate.
pub fn remove_generated_files(
    repo_dir: &Path,
    request: &WorkflowRequest,
) -> Result<Vec<PathBuf>, AppError> {
    let templates = request
        .component_path
        .join("workflow-templates")
        .join(request.provider.template_dir());
    if !templates.is_dir() {
        tracing::debug!(path = %templates.display(), "No workflow templates to clear");
        return Ok(Vec::new());
    }

    let mut removed = Vec::new();
    for entry in WalkDir::new(&templates).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&templates) else {
            continue;
        };
        let target = repo_dir.join(relative);
        if target.is_file() {
            fs::remove_file(&target)?;
            tracing::debug!(path = %relative.display(), "Removed previously generated file");
            removed.push(relative.to_path_buf());
        }
    }
    Ok(removed)
}

impl WorkflowGenerator for StkCommandAdapter {
    fn is_using_workspace(&self) -> bool {
        self.workspace_config_path().is_some_and(|path| path.exists())
    }

    fn exit_workspace(&self) -> Result<(), AppError> {
        tracing::info!("Exiting stk workspace...");
        let status = Command::new(&self.binary)
            .args(["exit", "workspace"])
            .status()
            .map_err(|e| AppError::ExternalTool { tool: self.binary.clone(), error: e.to_string() })?;
        if !status.success() {
            return Err(AppError::ExternalTool {
                tool: self.binary.clone(),
                error: format!("'exit workspace' exited with {status}"),
            });
        }
        Ok(())
    }

    fn create_workflow_files(
        &self,
        repo_dir: &Path,
        request: &WorkflowRequest,
    ) -> Result<(), AppError> {
        // stk runs inside the clone; both steps must see the same component.
        let request = WorkflowRequest {
            component_path: std::path::absolute(&request.component_path)?,
            ..request.clone()
        };
        let result = remove_generated_files(repo_dir, &request)
            .and_then(|_| self.apply_plugin(repo_dir, &request));

        let stk_dir = repo_dir.join(".stk");
        if stk_dir.exists() {
            if let Err(e) = fs::remove_dir_all(&stk_dir) {
                tracing::warn!(error = %e, "Failed to remove .stk directory");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderKind;

    fn request(component: &Path) -> WorkflowRequest {
        WorkflowRequest {
            component_path: component.to_path_buf(),
            provider: ProviderKind::Github,
            use_self_hosted_pool: None,
            self_hosted_pool_name: None,
        }
    }

    #[test]
    fn removes_only_files_the_templates_produce() {
        let component = tempfile::tempdir().unwrap();
        let templates = component.path().join("workflow-templates/github/.github/workflows");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("stk.yml"), "template").unwrap();

        let repo = tempfile::tempdir().unwrap();
        let workflows = repo.path().join(".github/workflows");
        fs::create_dir_all(&workflows).unwrap();
        fs::write(workflows.join("stk.yml"), "old").unwrap();
        fs::write(workflows.join("ci.yml"), "keep").unwrap();

        let removed = remove_generated_files(repo.path(), &request(component.path())).unwrap();

        assert_eq!(removed, vec![PathBuf::from(".github/workflows/stk.yml")]);
        assert!(!workflows.join("stk.yml").exists());
        assert!(workflows.join("ci.yml").exists());
    }

    #[test]
    fn missing_template_dir_is_a_no_op() {
        let component = tempfile::tempdir().unwrap();
        let repo = tempfile::tempdir().unwrap();
        assert!(remove_generated_files(repo.path(), &request(component.path())).unwrap().is_empty());
    }

    #[test]
    fn workspace_detection_uses_home() {
        let home = tempfile::tempdir().unwrap();
        let adapter = StkCommandAdapter::new("stk").with_home(home.path());
        assert!(!adapter.is_using_workspace());

        let workspaces = home.path().join(".stk/workspaces");
        fs::create_dir_all(&workspaces).unwrap();
        fs::write(workspaces.join("workspace-config.json"), "{}").unwrap();
        assert!(adapter.is_using_workspace());
    }

    #[cfg(unix)]
    fn script(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("stk");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[test]
    fn apply_runs_in_clone_and_cleans_stk_dir() {
        let bin = tempfile::tempdir().unwrap();
        let stk = script(bin.path(), "mkdir -p .stk && echo \"$@\" > applied.txt");
        let component = tempfile::tempdir().unwrap();
        let repo = tempfile::tempdir().unwrap();

        StkCommandAdapter::new(stk)
            .create_workflow_files(repo.path(), &request(component.path()))
            .unwrap();

        let args = fs::read_to_string(repo.path().join("applied.txt")).unwrap();
        assert!(args.starts_with("apply plugin "));
        assert!(args.contains("--skip-warning --provider Github --alias setup-scm"));
        assert!(!repo.path().join(".stk").exists());
    }

    #[cfg(unix)]
    #[test]
    fn relative_component_resolves_against_process_dir() {
        let component = tempfile::Builder::new().prefix("component-").tempdir_in(".").unwrap();
        let templates = component.path().join("workflow-templates/github");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("stk.yml"), "template").unwrap();
        let relative = PathBuf::from(component.path().file_name().unwrap());
        assert!(relative.is_relative());

        let bin = tempfile::tempdir().unwrap();
        let stk = script(
            bin.path(),
            "if [ -d \"$3/workflow-templates\" ]; then echo found > seen.txt; else echo missing > seen.txt; fi",
        );
        let repo = tempfile::tempdir().unwrap();
        fs::write(repo.path().join("stk.yml"), "old").unwrap();

        StkCommandAdapter::new(stk).create_workflow_files(repo.path(), &request(&relative)).unwrap();

        assert!(!repo.path().join("stk.yml").exists());
        assert_eq!(fs::read_to_string(repo.path().join("seen.txt")).unwrap().trim(), "found");
    }

    #[cfg(unix)]
    #[test]
    fn failing_apply_maps_exit_code() {
        let bin = tempfile::tempdir().unwrap();
        let stk = script(bin.path(), "mkdir -p .stk; exit 3");
        let component = tempfile::tempdir().unwrap();
        let repo = tempfile::tempdir().unwrap();

        let err = StkCommandAdapter::new(stk)
            .create_workflow_files(repo.path(), &request(component.path()))
            .unwrap_err();

        assert!(matches!(err, AppError::ApplyPluginSetupRepository { code: Some(3) }));
        assert!(!repo.path().join(".stk").exists());
    }
}
