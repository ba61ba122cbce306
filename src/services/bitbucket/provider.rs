use std::cell::OnceCell;

use serde_json::Value;
use url::Url;

use crate::domain::{AppError, Inputs, MAIN_BRANCH, ToolConfig, project_key, remote_url};
use crate::ports::Provider;
use crate::services::bitbucket::{BitbucketApi, PipelineVariable};
use crate::services::http_client::endpoint;

/// Bitbucket Cloud repository inside a workspace project.
#[derive(Debug)]
pub struct BitbucketProvider {
    inputs: Inputs,
    project: String,
    api: BitbucketApi,
    web: Url,
    variables: Vec<PipelineVariable>,
    project_key: OnceCell<String>,
}

impl BitbucketProvider {
    pub fn new(inputs: Inputs, config: &ToolConfig) -> Result<Self, AppError> {
        let project = inputs.require_project()?.to_string();
        let endpoints = &config.endpoints;
        let api = match (&inputs.client_key, &inputs.client_secret) {
            (Some(key), Some(secret)) => BitbucketApi::with_client_credentials(
                endpoints.bitbucket_api.clone(),
                endpoints.bitbucket_auth.clone(),
                key,
                secret,
                &config.http,
            )?,
            _ => BitbucketApi::with_token(
                endpoints.bitbucket_api.clone(),
                endpoints.bitbucket_auth.clone(),
                &inputs.token,
                &config.http,
            )?,
        };
        let workflow_api = endpoints.workflow_api.as_str().trim_end_matches('/');

        Ok(Self {
            inputs,
            project,
            api,
            web: endpoints.bitbucket_web.clone(),
            variables: default_variables(workflow_api),
            project_key: OnceCell::new(),
        })
    }

    fn workspace(&self) -> &str {
        &self.inputs.org_name
    }

    /// Key of the project matching by key or name, creating the project when absent.
    fn resolve_project_key(&self) -> Result<String, AppError> {
        if let Some(key) = self.project_key.get() {
            return Ok(key.clone());
        }

        let key = match self.find_project_key()? {
            Some(key) => {
                tracing::info!(project = %self.project, key = %key, "Project found in the workspace.");
                key
            }
            None => self.create_project()?,
        };
        Ok(self.project_key.get_or_init(|| key).clone())
    }

    fn find_project_key(&self) -> Result<Option<String>, AppError> {
        let projects = match self.api.list_projects(self.workspace()) {
            Ok(projects) => projects,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };
        let values = projects.get("values").and_then(Value::as_array);
        Ok(values.into_iter().flatten().find_map(|project| {
            let key = project.get("key").and_then(Value::as_str)?;
            let name = project.get("name").and_then(Value::as_str);
            (key == self.project || name == Some(self.project.as_str())).then(|| key.to_string())
        }))
    }

    fn create_project(&self) -> Result<String, AppError> {
        tracing::info!(project = %self.project, workspace = %self.workspace(), "Creating project");
        let key = project_key::derive_project_key(&self.project, |candidate| {
            tracing::info!(key = candidate, "Checking if the project key exists.");
            self.api.get_project(self.workspace(), candidate)?.exists("bitbucket get project")
        })?;
        tracing::info!(key = %key, "Project key set");
        self.api.create_project(self.workspace(), &self.project, &key)?;
        Ok(key)
    }

    fn reconcile_variables(&self) -> Result<(), AppError> {
        let current = self.api.list_variables(self.workspace(), &self.inputs.repo_name)?;
        let current = current.get("values").and_then(Value::as_array);

        for variable in &self.variables {
            let existing = current
                .into_iter()
                .flatten()
                .find(|entry| entry.get("key").and_then(Value::as_str) == Some(variable.key.as_str()));

            match existing {
                None => {
                    self.api.create_variable(self.workspace(), &self.inputs.repo_name, variable)?;
                }
                Some(entry)
                    if entry.get("value").and_then(Value::as_str) == Some(variable.value.as_str()) =>
                {
                    tracing::debug!(key = %variable.key, "Repository variable up to date");
                }
                Some(entry) => {
                    let uuid = entry.get("uuid").and_then(Value::as_str).ok_or_else(|| {
                        AppError::parse_error("bitbucket repository variable", "missing 'uuid'")
                    })?;
                    self.api.update_variable(self.workspace(), &self.inputs.repo_name, uuid, variable)?;
                }
            }
        }
        Ok(())
    }

    fn repo_web_url(&self) -> Result<Url, AppError> {
        endpoint(&self.web, &[self.inputs.org_name.as_str(), self.inputs.repo_name.as_str()])
    }
}

fn default_variables(workflow_api: &str) -> Vec<PipelineVariable> {
    vec![
        PipelineVariable::plain("workflow_config", "stk"),
        PipelineVariable::plain("debug", "false"),
        PipelineVariable::plain("debugHttp", "false"),
        PipelineVariable::plain("workflow_api", workflow_api),
    ]
}

impl Provider for BitbucketProvider {
    fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    fn repo_exists(&self) -> Result<bool, AppError> {
        self.api
            .get_repository(self.workspace(), &self.inputs.repo_name)?
            .exists("bitbucket get repository")
    }

    fn execute_repo_creation(&self) -> Result<(), AppError> {
        let key = self.resolve_project_key()?;
        self.api.create_repository(
            self.workspace(),
            &self.inputs.repo_name,
            &key,
            self.inputs.visibility,
        )?;
        Ok(())
    }

    fn clone_url(&self) -> Result<String, AppError> {
        let token = self.api.access_token()?;
        remote_url::with_credentials(&self.repository_url()?, "x-token-auth", &token)
    }

    fn create_pull_request(&self) -> Result<String, AppError> {
        let pull = self.api.create_pull_request(
            self.workspace(),
            &self.inputs.repo_name,
            self.inputs.pr_title(),
            &self.inputs.ref_branch,
            MAIN_BRANCH,
        )?;
        pull.pointer("/links/html/href")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::parse_error("bitbucket pull request", "missing 'links.html.href'"))
    }

    fn extra_setup(&self) -> Result<(), AppError> {
        self.api.enable_pipelines(self.workspace(), &self.inputs.repo_name)?;
        self.reconcile_variables()
    }

    fn repository_url(&self) -> Result<String, AppError> {
        Ok(format!("{}.git", self.repo_web_url()?))
    }

    fn scm_config_url(&self) -> Result<String, AppError> {
        Ok(self.repo_web_url()?.to_string())
    }
}
