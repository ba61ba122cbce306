//! Repository setup orchestrator.
//!
//! Walks `SetupStage` from `Start` to `Done`: ensure the repository, clone it
//! into a scratch directory, materialize the workflow files, commit them to
//! `main` (first run) or to `ref_branch` behind a pull request (later runs),
//! then let the provider finish its own post-setup.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

use crate::app::AppContext;
use crate::domain::remote_url::redact;
use crate::domain::{AppError, CommitOutcome, MAIN_BRANCH, SetupOutcome, SetupStage};
use crate::ports::{Confirm, Git, Provider, WorkflowGenerator, WorkflowRequest};

const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";
const UPDATE_COMMIT_MESSAGE: &str = "Update commit";
const WORKSPACE_QUESTION: &str =
    "An stk workspace is in use and must be exited to continue. Exit it now?";

/// Options for the setup command.
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Pause after repository creation.
    pub settle_delay: Duration,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self { settle_delay: Duration::from_secs(5) }
    }
}

/// Execute the setup command.
pub fn execute<G, W, C, P>(
    ctx: &AppContext<G, W, C>,
    provider: &P,
    options: &SetupOptions,
) -> Result<SetupOutcome, AppError>
where
    G: Git,
    W: WorkflowGenerator,
    C: Confirm,
    P: Provider + ?Sized,
{
    let mut stage = SetupStage::Start;
    let result = run_stages(ctx, provider, options, &mut stage);
    if let Err(err) = &result {
        tracing::error!(stage = %stage, error = %err, "Setup aborted");
    }
    result
}

fn run_stages<G, W, C, P>(
    ctx: &AppContext<G, W, C>,
    provider: &P,
    options: &SetupOptions,
    stage: &mut SetupStage,
) -> Result<SetupOutcome, AppError>
where
    G: Git,
    W: WorkflowGenerator,
    C: Confirm,
    P: Provider + ?Sized,
{
    let inputs = provider.inputs();
    tracing::info!(
        provider = %inputs.provider,
        org = %inputs.org_name,
        repo = %inputs.repo_name,
        "Starting repository setup"
    );
    preflight(ctx)?;

    enter(stage, SetupStage::EnsureRepo);
    let created_repo = ensure_repo(provider)?;
    if created_repo && !options.settle_delay.is_zero() {
        tracing::debug!(delay = ?options.settle_delay, "Waiting for the repository to settle");
        thread::sleep(options.settle_delay);
    }

    enter(stage, SetupStage::Clone);
    let workdir = tempfile::Builder::new().prefix("scm-setup-").tempdir()?;
    let repo_dir = clone_into(ctx.git(), provider, &workdir)?;

    enter(stage, SetupStage::MaterializeWorkflow);
    let request = WorkflowRequest::from_inputs(inputs);
    ctx.generator().create_workflow_files(&repo_dir, &request)?;

    enter(stage, SetupStage::CommitDecision);
    let commit = if ctx.git().remote_branch_exists(&repo_dir, MAIN_BRANCH)? {
        enter(stage, SetupStage::CommitBranchAndPr);
        commit_branch_and_pr(ctx, provider, &repo_dir, &request)?
    } else {
        enter(stage, SetupStage::CommitMain);
        commit_main(ctx.git(), &repo_dir)?
    };

    enter(stage, SetupStage::ProviderPostSetup);
    provider.extra_setup()?;

    let outcome = SetupOutcome {
        created_repo,
        commit,
        repository_url: provider.repository_url()?,
        scm_config_url: provider.scm_config_url()?,
    };
    drop(workdir);

    enter(stage, SetupStage::Done);
    tracing::info!(url = %outcome.scm_config_url, "Repository configured");
    Ok(outcome)
}

fn enter(stage: &mut SetupStage, next: SetupStage) {
    tracing::debug!(from = %stage, to = %next, "Stage transition");
    *stage = next;
}

/// Git identity and stk workspace checks that gate the whole run.
fn preflight<G, W, C>(ctx: &AppContext<G, W, C>) -> Result<(), AppError>
where
    G: Git,
    W: WorkflowGenerator,
    C: Confirm,
{
    if !ctx.git().has_global_identity()? {
        return Err(AppError::GitUserSetup);
    }

    if ctx.generator().is_using_workspace() {
        if !ctx.confirm().confirm(WORKSPACE_QUESTION)? {
            return Err(AppError::WorkspaceShouldNotInUse);
        }
        ctx.generator().exit_workspace()?;
        tracing::info!("Exited stk workspace");
    }
    Ok(())
}

/// Returns whether the repository was created by this run.
pub(crate) fn ensure_repo<P: Provider + ?Sized>(provider: &P) -> Result<bool, AppError> {
    let exists = provider.repo_exists()?;
    if provider.inputs().create_repo {
        if exists {
            return Err(AppError::RepoAlreadyExists);
        }
        provider.execute_repo_creation()?;
        tracing::info!(repo = %provider.inputs().repo_name, "Repository created");
        Ok(true)
    } else {
        if !exists {
            return Err(AppError::RepoDoesNotExist);
        }
        tracing::info!(repo = %provider.inputs().repo_name, "Using existing repository");
        Ok(false)
    }
}

fn clone_into<G, P>(git: &G, provider: &P, workdir: &TempDir) -> Result<PathBuf, AppError>
where
    G: Git,
    P: Provider + ?Sized,
{
    let url = provider.clone_url()?;
    let repo_dir = workdir.path().join(&provider.inputs().repo_name);
    tracing::info!(url = %redact(&url), "Cloning repository");
    git.clone_repo(&url, &repo_dir)?;
    Ok(repo_dir)
}

fn commit_main<G: Git>(git: &G, repo_dir: &Path) -> Result<CommitOutcome, AppError> {
    git.stage_all(repo_dir)?;
    git.commit(repo_dir, INITIAL_COMMIT_MESSAGE)?;
    git.rename_current_branch(repo_dir, MAIN_BRANCH)?;
    git.push(repo_dir, MAIN_BRANCH)?;
    tracing::info!("Workflow files committed to main");
    Ok(CommitOutcome::InitializedMain)
}

fn commit_branch_and_pr<G, W, C, P>(
    ctx: &AppContext<G, W, C>,
    provider: &P,
    repo_dir: &Path,
    request: &WorkflowRequest,
) -> Result<CommitOutcome, AppError>
where
    G: Git,
    W: WorkflowGenerator,
    C: Confirm,
    P: Provider + ?Sized,
{
    let git = ctx.git();
    let branch = provider.inputs().ref_branch.as_str();
    git.create_branch(repo_dir, branch, &format!("origin/{MAIN_BRANCH}"))?;
    ctx.generator().create_workflow_files(repo_dir, request)?;

    if !git.has_uncommitted_changes(repo_dir)? {
        tracing::info!("Workflow files are up to date, nothing to commit");
        return Ok(CommitOutcome::Unchanged);
    }

    git.stage_all(repo_dir)?;
    git.commit(repo_dir, UPDATE_COMMIT_MESSAGE)?;
    git.push(repo_dir, branch)?;
    let url = provider.create_pull_request()?;
    tracing::info!(branch, url = %url, "Pull request opened");
    Ok(CommitOutcome::PullRequest { branch: branch.to_string(), url })
}
