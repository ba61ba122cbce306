//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::app::commands::setup::SetupOptions;
use crate::app::commands::{create_repo, setup};
use crate::app::config::{PathOverrides, load_inputs, load_tool_config};
use crate::domain::{AppError, RunOutput, SetupOutcome, ToolConfig};
use crate::ports::{AssumeNo, AssumeYes, Confirm};
use crate::services::{
    DialoguerConfirm, GitCommandAdapter, StkCommandAdapter, build_provider, write_run_output,
};

/// How yes/no questions are answered during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmMode {
    /// Fail closed.
    #[default]
    AssumeNo,
    AssumeYes,
    Interactive,
}

/// Everything a command needs to locate its inputs and outputs.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub metadata: PathBuf,
    pub config: Option<PathBuf>,
    pub overrides: PathOverrides,
    pub output_dir: PathBuf,
    pub confirm: ConfirmMode,
}

/// Result of `setup`, including where the run output was written.
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub outcome: SetupOutcome,
    pub output_file: PathBuf,
}

/// Result of `create-repo`.
#[derive(Debug, Clone)]
pub struct CreateRepoReport {
    pub repository_url: String,
    pub output_file: PathBuf,
}

/// Run the full repository setup.
pub fn setup(request: &RunRequest) -> Result<SetupReport, AppError> {
    let config = load_tool_config(request.config.as_deref())?;
    match request.confirm {
        ConfirmMode::AssumeNo => setup_with(request, &config, AssumeNo),
        ConfirmMode::AssumeYes => setup_with(request, &config, AssumeYes),
        ConfirmMode::Interactive => setup_with(request, &config, DialoguerConfirm),
    }
}

fn setup_with<C: Confirm>(
    request: &RunRequest,
    config: &ToolConfig,
    confirm: C,
) -> Result<SetupReport, AppError> {
    let inputs = load_inputs(&request.metadata, request.overrides.clone())?;
    let provider = build_provider(inputs, config)?;
    let generator = StkCommandAdapter::new(config.setup.stk_binary.clone());
    let ctx = AppContext::new(GitCommandAdapter::new(), generator, confirm);
    let options = SetupOptions { settle_delay: config.setup.settle_delay() };

    let outcome = setup::execute(&ctx, &provider, &options)?;
    let output_file = persist(&request.output_dir, config, &outcome.repository_url)?;
    Ok(SetupReport { outcome, output_file })
}

/// Ensure the repository (and its vendor container) exists.
pub fn create_repo(request: &RunRequest) -> Result<CreateRepoReport, AppError> {
    let config = load_tool_config(request.config.as_deref())?;
    let inputs = load_inputs(&request.metadata, request.overrides.clone())?;
    let provider = build_provider(inputs, &config)?;

    let repository_url = create_repo::execute(&provider)?;
    let output_file = persist(&request.output_dir, &config, &repository_url)?;
    Ok(CreateRepoReport { repository_url, output_file })
}

fn persist(dir: &Path, config: &ToolConfig, url: &str) -> Result<PathBuf, AppError> {
    write_run_output(dir, &config.setup.output_file, &RunOutput::created_repository(url))
}
