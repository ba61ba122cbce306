use std::path::{Path, PathBuf};

use crate::domain::{AppError, Inputs, ProviderKind};

/// What the template generator needs to render workflow files for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRequest {
    pub component_path: PathBuf,
    pub provider: ProviderKind,
    pub use_self_hosted_pool: Option<bool>,
    pub self_hosted_pool_name: Option<String>,
}

impl WorkflowRequest {
    pub fn from_inputs(inputs: &Inputs) -> Self {
        Self {
            component_path: inputs.component_path.clone(),
            provider: inputs.provider,
            use_self_hosted_pool: inputs.use_self_hosted_pool,
            self_hosted_pool_name: inputs.self_hosted_pool_name.clone(),
        }
    }
}

/// External workflow-template generator (the `stk` CLI).
pub trait WorkflowGenerator {
    /// Whether a generator workspace is currently active for the user.
    fn is_using_workspace(&self) -> bool;

    fn exit_workspace(&self) -> Result<(), AppError>;

    /// Regenerate workflow files inside `repo_dir`, replacing earlier output.
    fn create_workflow_files(&self, repo_dir: &Path, request: &WorkflowRequest)
    -> Result<(), AppError>;
}
