use serde_json::Value;
use url::Url;

use crate::domain::{AppError, Inputs, MAIN_BRANCH, ToolConfig, conflict, remote_url};
use crate::ports::Provider;
use crate::services::github::GithubApi;
use crate::services::http_client::endpoint;

/// Organization-scoped GitHub repository with a workflow webhook.
#[derive(Debug)]
pub struct GithubProvider {
    inputs: Inputs,
    api: GithubApi,
    web: Url,
    callback: Url,
}

impl GithubProvider {
    pub fn new(inputs: Inputs, config: &ToolConfig) -> Result<Self, AppError> {
        let api =
            GithubApi::new(config.endpoints.github_api.clone(), &inputs.token, &config.http)?;
        Ok(Self {
            inputs,
            api,
            web: config.endpoints.github_web.clone(),
            callback: config.endpoints.workflow_callback.clone(),
        })
    }

    fn hook_exists(&self) -> Result<bool, AppError> {
        tracing::info!("Checking if webhook is already configured...");
        let hooks = self.api.list_hooks(&self.inputs.org_name, &self.inputs.repo_name)?;
        let hooks = hooks.as_array().map(Vec::as_slice).unwrap_or_default();
        Ok(hooks.iter().any(|hook| {
            hook.pointer("/config/url").and_then(Value::as_str) == Some(self.callback.as_str())
        }))
    }

    fn repo_web_url(&self) -> Result<Url, AppError> {
        endpoint(&self.web, &[self.inputs.org_name.as_str(), self.inputs.repo_name.as_str()])
    }
}

impl Provider for GithubProvider {
    fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    fn repo_exists(&self) -> Result<bool, AppError> {
        self.api
            .get_repository(&self.inputs.org_name, &self.inputs.repo_name)?
            .exists("github get repository")
    }

    fn execute_repo_creation(&self) -> Result<(), AppError> {
        let response = self.api.create_repository(
            &self.inputs.org_name,
            &self.inputs.repo_name,
            self.inputs.visibility,
        )?;
        if response.is_success() {
            return Ok(());
        }
        if conflict::github_repository_exists(response.status, &response.body) {
            tracing::warn!(repo = %self.inputs.repo_name, "Github repository already exists");
            return Ok(());
        }
        Err(response.into_error("github create repository"))
    }

    fn clone_url(&self) -> Result<String, AppError> {
        remote_url::with_credentials(&self.repository_url()?, "git", &self.inputs.token)
    }

    fn create_pull_request(&self) -> Result<String, AppError> {
        let pull = self.api.create_pull_request(
            &self.inputs.org_name,
            &self.inputs.repo_name,
            self.inputs.pr_title(),
            &self.inputs.ref_branch,
            MAIN_BRANCH,
        )?;
        pull.get("html_url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::parse_error("github pull request", "missing 'html_url'"))
    }

    fn extra_setup(&self) -> Result<(), AppError> {
        if self.hook_exists()? {
            tracing::info!("Webhook is already configured.");
            return Ok(());
        }
        tracing::info!("Webhook not found. Setting up repository webhook...");
        self.api.create_hook(&self.inputs.org_name, &self.inputs.repo_name, &self.callback)?;
        Ok(())
    }

    fn repository_url(&self) -> Result<String, AppError> {
        Ok(format!("{}.git", self.repo_web_url()?))
    }

    fn scm_config_url(&self) -> Result<String, AppError> {
        Ok(self.repo_web_url()?.to_string())
    }
}
