use crate::ports::{Confirm, Git, WorkflowGenerator};

/// Application context holding the local collaborators of a setup run.
pub struct AppContext<G: Git, W: WorkflowGenerator, C: Confirm> {
    git: G,
    generator: W,
    confirm: C,
}

impl<G: Git, W: WorkflowGenerator, C: Confirm> AppContext<G, W, C> {
    /// Create a new application context.
    pub fn new(git: G, generator: W, confirm: C) -> Self {
        Self { git, generator, confirm }
    }

    /// Get a reference to the git adapter.
    pub fn git(&self) -> &G {
        &self.git
    }

    /// Get a reference to the workflow generator.
    pub fn generator(&self) -> &W {
        &self.generator
    }

    /// Get a reference to the confirmation strategy.
    pub fn confirm(&self) -> &C {
        &self.confirm
    }
}
