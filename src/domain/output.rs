//! Persisted run output consumed by the next pipeline step.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    pub outputs: RunOutputs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutputs {
    pub created_repository: String,
}

impl RunOutput {
    pub fn created_repository(url: impl Into<String>) -> Self {
        Self { outputs: RunOutputs { created_repository: url.into() } }
    }
}
