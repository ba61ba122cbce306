//! Azure DevOps REST 7.0 request builders.

use serde_json::{Value, json};
use url::Url;

use crate::domain::{AppError, HttpConfig, Visibility};
use crate::services::http_client::{ApiResponse, Auth, HttpClient, endpoint_with_query};

const API_VERSION: (&str, &str) = ("api-version", "7.0");
const PREVIEW_API_VERSION: (&str, &str) = ("api-version", "7.0-preview");
/// Agile process template.
const PROCESS_TEMPLATE_ID: &str = "6b724908-ef14-45cf-84f8-768b5384da45";
pub const SERVICE_CONNECTION_NAME: &str = "stackspot_github_connection";

#[derive(Debug, Clone)]
pub struct AzureApi {
    http: HttpClient,
    base: Url,
    auth: Auth,
}

impl AzureApi {
    pub fn new(base: Url, org: &str, token: &str, config: &HttpConfig) -> Result<Self, AppError> {
        Ok(Self {
            http: HttpClient::new(config, &[])?,
            base,
            auth: Auth::Basic { user: org.to_string(), password: token.to_string() },
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, AppError> {
        endpoint_with_query(&self.base, segments, &[API_VERSION])
    }

    pub fn get_project(&self, org: &str, project: &str) -> Result<ApiResponse, AppError> {
        let url = self.url(&[org, "_apis", "projects", project])?;
        self.http.get("azure get project", url, &self.auth)
    }

    /// Queue project creation. Returns the operation reference to poll.
    pub fn create_project(
        &self,
        org: &str,
        project: &str,
        visibility: Visibility,
    ) -> Result<Value, AppError> {
        tracing::info!(org, project, "Azure create project...");
        let url = self.url(&[org, "_apis", "projects"])?;
        let body = json!({
            "name": project,
            "description": "StackSpot workflows",
            "visibility": visibility.as_str(),
            "capabilities": {
                "versioncontrol": {"sourceControlType": "Git"},
                "processTemplate": {"templateTypeId": PROCESS_TEMPLATE_ID},
            },
        });
        self.http
            .post("azure create project", url, &self.auth, &body)?
            .expect_success("azure create project")
    }

    pub fn get_operation(&self, org: &str, operation_id: &str) -> Result<Value, AppError> {
        let url = self.url(&[org, "_apis", "operations", operation_id])?;
        self.http
            .get("azure get operation", url, &self.auth)?
            .expect_success("azure get operation")
    }

    pub fn get_repository(
        &self,
        org: &str,
        project: &str,
        repo: &str,
    ) -> Result<ApiResponse, AppError> {
        let url = self.url(&[org, project, "_apis", "git", "repositories", repo])?;
        self.http.get("azure get repository", url, &self.auth)
    }

    pub fn create_repository(
        &self,
        org: &str,
        project_id: &str,
        repo: &str,
    ) -> Result<Value, AppError> {
        tracing::info!(org, repo, "Azure create repository...");
        let url = self.url(&[org, "_apis", "git", "repositories"])?;
        let body = json!({"name": repo, "project": {"id": project_id}});
        self.http
            .post("azure create repository", url, &self.auth, &body)?
            .expect_success("azure create repository")
    }

    pub fn create_pull_request(
        &self,
        org: &str,
        project: &str,
        repository_id: &str,
        title: &str,
        source: &str,
        target: &str,
    ) -> Result<Value, AppError> {
        tracing::info!(org, project, source, target, "Azure create pull request...");
        let url = self.url(&[org, project, "_apis", "git", "repositories", repository_id, "pullrequests"])?;
        let body = json!({
            "sourceRefName": format!("refs/heads/{source}"),
            "targetRefName": format!("refs/heads/{target}"),
            "title": title,
            "description": title,
        });
        self.http
            .post("azure create pull request", url, &self.auth, &body)?
            .expect_success("azure create pull request")
    }

    pub fn create_pipeline(
        &self,
        org: &str,
        project: &str,
        repository_id: &str,
        name: &str,
    ) -> Result<ApiResponse, AppError> {
        tracing::info!(org, project, pipeline = name, "Azure create pipeline...");
        let url = self.url(&[org, project, "_apis", "pipelines"])?;
        let body = json!({
            "name": name,
            "folder": "\\",
            "configuration": {
                "type": "yaml",
                "path": format!("{name}.yml"),
                "variables": {
                    "secret_git": {"isSecret": true},
                    "secret_stk_login": {"isSecret": true},
                },
                "repository": {"id": repository_id, "type": "azureReposGit"},
            },
        });
        self.http.post("azure create pipeline", url, &self.auth, &body)
    }

    pub fn create_service_connection(
        &self,
        org: &str,
        project: &str,
        project_id: &str,
        github_pat: &str,
    ) -> Result<ApiResponse, AppError> {
        tracing::info!(org, project, "Azure create service endpoint...");
        let url = self.url(&[org, project, "_apis", "serviceendpoint", "endpoints"])?;
        let body = json!({
            "name": SERVICE_CONNECTION_NAME,
            "description": "Connection to StackSpot github",
            "type": "github",
            "url": "https://github.com",
            "authorization": {
                "scheme": "Token",
                "parameters": {"AccessToken": github_pat, "apitoken": ""},
            },
            "serviceEndpointProjectReferences": [{
                "projectReference": {"id": project_id, "name": project},
                "name": SERVICE_CONNECTION_NAME,
                "description": "Connection to StackSpot github",
            }],
        });
        self.http.post("azure create service endpoint", url, &self.auth, &body)
    }

    /// Authorise a service connection for every pipeline in the project.
    pub fn authorize_endpoint(
        &self,
        org: &str,
        project: &str,
        endpoint_id: &str,
    ) -> Result<Value, AppError> {
        tracing::info!(org, project, endpoint_id, "Azure update pipeline permission endpoint...");
        let url = endpoint_with_query(
            &self.base,
            &[org, project, "_apis", "pipelines", "pipelinePermissions", "endpoint", endpoint_id],
            &[PREVIEW_API_VERSION],
        )?;
        let body = json!({
            "resource": {"id": endpoint_id, "type": "endpoint", "name": ""},
            "pipelines": [],
            "allPipelines": {"authorized": true, "authorizedBy": null, "authorizedOn": null},
        });
        self.http
            .patch("azure update pipeline permission endpoint", url, &self.auth, &body)?
            .expect_success("azure update pipeline permission endpoint")
    }
}
