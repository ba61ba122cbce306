mod fake_git;
mod fake_provider;
mod fake_workflow_generator;
mod fixtures;

pub use fake_git::FakeGit;
pub use fake_provider::FakeProvider;
pub use fake_workflow_generator::FakeWorkflowGenerator;
pub use fixtures::{inputs_for, test_config};
