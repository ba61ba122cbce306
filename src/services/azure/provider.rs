use std::thread;

use serde_json::Value;
use url::Url;

use crate::domain::{
    AppError, AzurePolling, Inputs, MAIN_BRANCH, ToolConfig, conflict, remote_url,
};
use crate::ports::Provider;
use crate::services::azure::AzureApi;
use crate::services::http_client::{endpoint, field_str};

pub const PIPELINE_NAME: &str = "middle-flow";

/// Azure DevOps repository inside a project that is provisioned on demand.
#[derive(Debug)]
pub struct AzureProvider {
    inputs: Inputs,
    project: String,
    api: AzureApi,
    web: Url,
    polling: AzurePolling,
}

impl AzureProvider {
    pub fn new(inputs: Inputs, config: &ToolConfig) -> Result<Self, AppError> {
        let project = inputs.require_project()?.to_string();
        let api = AzureApi::new(
            config.endpoints.azure_api.clone(),
            &inputs.org_name,
            &inputs.token,
            &config.http,
        )?;
        Ok(Self {
            inputs,
            project,
            api,
            web: config.endpoints.azure_web.clone(),
            polling: config.azure.clone(),
        })
    }

    fn org(&self) -> &str {
        &self.inputs.org_name
    }

    /// Existing project id, or `None` on 404.
    fn find_project_id(&self) -> Result<Option<String>, AppError> {
        let response = self.api.get_project(self.org(), &self.project)?;
        if response.status == 404 {
            tracing::info!(project = %self.project, "The project does not exist.");
            return Ok(None);
        }
        let body = response.expect_success("azure get project")?;
        field_str(&body, "id", "azure get project").map(Some)
    }

    fn repository_id(&self) -> Result<String, AppError> {
        let body = self
            .api
            .get_repository(self.org(), &self.project, &self.inputs.repo_name)?
            .expect_success("azure get repository")?;
        field_str(&body, "id", "azure get repository")
    }

    fn create_project(&self) -> Result<String, AppError> {
        let operation =
            self.api.create_project(self.org(), &self.project, self.inputs.visibility)?;
        let operation_id = field_str(&operation, "id", "azure create project")?;
        self.wait_for_provisioning(&operation_id)?;

        self.find_project_id()?
            .ok_or_else(|| AppError::NotFound { what: format!("azure project '{}'", self.project) })
    }

    fn wait_for_provisioning(&self, operation_id: &str) -> Result<(), AppError> {
        for attempt in 1..=self.polling.poll_attempts {
            tracing::info!(attempt, "Waiting to finalize the provisioning...");
            thread::sleep(self.polling.interval());

            let operation = self.api.get_operation(self.org(), operation_id)?;
            let status = operation.get("status").and_then(Value::as_str).unwrap_or_default();
            match status {
                "provisioning" | "inProgress" => continue,
                "succeeded" => {
                    tracing::info!(project = %self.project, "The project successfully created.");
                    return Ok(());
                }
                other => {
                    return Err(AppError::ProjectProvisioningFailed {
                        project: self.project.clone(),
                        status: other.to_string(),
                    });
                }
            }
        }

        Err(AppError::ProjectProvisioningTimeout {
            project: self.project.clone(),
            attempts: self.polling.poll_attempts,
        })
    }

    fn setup_pipeline(&self, repository_id: &str) -> Result<(), AppError> {
        let response =
            self.api.create_pipeline(self.org(), &self.project, repository_id, PIPELINE_NAME)?;
        if response.is_success() {
            return Ok(());
        }
        if conflict::azure_pipeline_exists(response.status) {
            tracing::info!(pipeline = PIPELINE_NAME, "Pipeline already exists");
            return Ok(());
        }
        Err(response.into_error("azure create pipeline"))
    }

    fn setup_github_connection(&self, github_pat: &str) -> Result<(), AppError> {
        let project_id = self.find_project_id()?.ok_or_else(|| AppError::NotFound {
            what: format!("azure project '{}'", self.project),
        })?;

        let response =
            self.api.create_service_connection(self.org(), &self.project, &project_id, github_pat)?;
        if conflict::azure_service_connection_exists(response.status, &response.body) {
            tracing::warn!("Git connection already exists with name stackspot_github_connection");
            return Ok(());
        }
        let connection = response.expect_success("azure create service endpoint")?;
        let endpoint_id = field_str(&connection, "id", "azure create service endpoint")?;
        self.api.authorize_endpoint(self.org(), &self.project, &endpoint_id)?;
        Ok(())
    }

    fn project_web_url(&self) -> Result<Url, AppError> {
        endpoint(&self.web, &[self.inputs.org_name.as_str(), self.project.as_str()])
    }
}

impl Provider for AzureProvider {
    fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    fn repo_exists(&self) -> Result<bool, AppError> {
        if self.find_project_id()?.is_none() {
            return Ok(false);
        }
        self.api
            .get_repository(self.org(), &self.project, &self.inputs.repo_name)?
            .exists("azure get repository")
    }

    fn execute_repo_creation(&self) -> Result<(), AppError> {
        let project_id = match self.find_project_id()? {
            Some(id) => {
                tracing::info!(project = %self.project, "The project already exists.");
                id
            }
            None => self.create_project()?,
        };

        // New projects come with a default repository named after the project.
        let repository = self.api.get_repository(self.org(), &self.project, &self.inputs.repo_name)?;
        if repository.status == 404 {
            self.api.create_repository(self.org(), &project_id, &self.inputs.repo_name)?;
            tracing::info!(repo = %self.inputs.repo_name, "The repository successfully created.");
            return Ok(());
        }
        repository.expect_success("azure get repository")?;
        tracing::info!(repo = %self.inputs.repo_name, "The repository already exists.");
        Ok(())
    }

    fn clone_url(&self) -> Result<String, AppError> {
        remote_url::with_credentials(&self.repository_url()?, &self.inputs.org_name, &self.inputs.token)
    }

    fn create_pull_request(&self) -> Result<String, AppError> {
        let repository_id = self.repository_id()?;
        let pull = self.api.create_pull_request(
            self.org(),
            &self.project,
            &repository_id,
            self.inputs.pr_title(),
            &self.inputs.ref_branch,
            MAIN_BRANCH,
        )?;
        let pull_id = field_str(&pull, "pullRequestId", "azure create pull request")?;
        Ok(format!("{}/pullrequest/{pull_id}", self.repository_url()?))
    }

    fn extra_setup(&self) -> Result<(), AppError> {
        let repository_id = self.repository_id()?;
        self.setup_pipeline(&repository_id)?;
        match self.inputs.github_pat.as_deref() {
            Some(github_pat) => self.setup_github_connection(github_pat),
            None => {
                tracing::info!("No 'github_pat' provided, skipping GitHub service connection");
                Ok(())
            }
        }
    }

    fn repository_url(&self) -> Result<String, AppError> {
        let url = endpoint(
            &self.web,
            &[self.inputs.org_name.as_str(), self.project.as_str(), "_git", self.inputs.repo_name.as_str()],
        )?;
        Ok(url.to_string())
    }

    fn scm_config_url(&self) -> Result<String, AppError> {
        Ok(self.project_web_url()?.to_string())
    }
}
