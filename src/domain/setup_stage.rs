use std::fmt;

/// Orchestrator states, in the order a run walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStage {
    Start,
    EnsureRepo,
    Clone,
    MaterializeWorkflow,
    CommitDecision,
    CommitMain,
    CommitBranchAndPr,
    ProviderPostSetup,
    Done,
}

impl SetupStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetupStage::Start => "start",
            SetupStage::EnsureRepo => "ensure_repo",
            SetupStage::Clone => "clone",
            SetupStage::MaterializeWorkflow => "materialize_workflow",
            SetupStage::CommitDecision => "commit_decision",
            SetupStage::CommitMain => "commit_main",
            SetupStage::CommitBranchAndPr => "commit_branch_and_pr",
            SetupStage::ProviderPostSetup => "provider_post_setup",
            SetupStage::Done => "done",
        }
    }
}

impl fmt::Display for SetupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the commit step concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// First-time setup: everything committed straight to `main`.
    InitializedMain,
    /// Workflow files changed on `ref_branch`; a pull request was opened.
    PullRequest { branch: String, url: String },
    /// Regeneration produced no changes.
    Unchanged,
}

/// Result of a completed setup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    pub created_repo: bool,
    pub commit: CommitOutcome,
    pub repository_url: String,
    pub scm_config_url: String,
}
