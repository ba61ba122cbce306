mod confirm;
mod git;
mod provider;
mod workflow_generator;

pub use confirm::{AssumeNo, AssumeYes, Confirm};
pub use git::Git;
pub use provider::Provider;
pub use workflow_generator::{WorkflowGenerator, WorkflowRequest};
