use std::path::Path;
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{WorkflowGenerator, WorkflowRequest};

#[derive(Default)]
pub struct FakeWorkflowGenerator {
    pub using_workspace: bool,
    pub fails: bool,
    pub requests: Mutex<Vec<WorkflowRequest>>,
    pub exited: Mutex<bool>,
}

impl FakeWorkflowGenerator {
    pub fn in_workspace() -> Self {
        Self { using_workspace: true, ..Self::default() }
    }

    pub fn failing() -> Self {
        Self { fails: true, ..Self::default() }
    }

    pub fn runs(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl WorkflowGenerator for FakeWorkflowGenerator {
    fn is_using_workspace(&self) -> bool {
        self.using_workspace && !*self.exited.lock().unwrap()
    }

    fn exit_workspace(&self) -> Result<(), AppError> {
        *self.exited.lock().unwrap() = true;
        Ok(())
    }

    fn create_workflow_files(
        &self,
        _repo_dir: &Path,
        request: &WorkflowRequest,
    ) -> Result<(), AppError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fails {
            return Err(AppError::ApplyPluginSetupRepository { code: Some(1) });
        }
        Ok(())
    }
}
