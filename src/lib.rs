//! scm-setup: provision SCM repositories and commit workflow configuration to them.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    ConfirmMode, CreateRepoReport, RunRequest, SetupReport, create_repo, setup,
};
pub use app::config::PathOverrides;
pub use domain::AppError;
