use crate::domain::{AppError, Inputs};

/// Uniform capability set over one SCM vendor.
///
/// One instance lives for one run. Vendor preconditions (Azure project,
/// Bitbucket project key, GitLab namespace) are resolved inside the
/// implementation before repository creation.
pub trait Provider {
    fn inputs(&self) -> &Inputs;

    /// `false` only when the vendor answers 404; every other failure propagates.
    fn repo_exists(&self) -> Result<bool, AppError>;

    /// Create the repository and any container it needs.
    fn execute_repo_creation(&self) -> Result<(), AppError>;

    /// HTTPS clone URL with vendor credentials embedded.
    fn clone_url(&self) -> Result<String, AppError>;

    /// Open a pull request from `ref_branch` into `main` and return its web URL.
    fn create_pull_request(&self) -> Result<String, AppError>;

    /// Vendor post-setup (hooks, pipelines, variables). Create-if-absent.
    fn extra_setup(&self) -> Result<(), AppError>;

    /// Credential-free repository URL recorded in the run output.
    fn repository_url(&self) -> Result<String, AppError>;

    /// Deep link to the vendor page where the integration can be reviewed.
    fn scm_config_url(&self) -> Result<String, AppError>;
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn inputs(&self) -> &Inputs {
        (**self).inputs()
    }

    fn repo_exists(&self) -> Result<bool, AppError> {
        (**self).repo_exists()
    }

    fn execute_repo_creation(&self) -> Result<(), AppError> {
        (**self).execute_repo_creation()
    }

    fn clone_url(&self) -> Result<String, AppError> {
        (**self).clone_url()
    }

    fn create_pull_request(&self) -> Result<String, AppError> {
        (**self).create_pull_request()
    }

    fn extra_setup(&self) -> Result<(), AppError> {
        (**self).extra_setup()
    }

    fn repository_url(&self) -> Result<String, AppError> {
        (**self).repository_url()
    }

    fn scm_config_url(&self) -> Result<String, AppError> {
        (**self).scm_config_url()
    }
}
